use glam::{Quat, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorKey {
    pub time: f64,
    pub value: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuatKey {
    pub time: f64,
    pub value: Quat,
}

/// Keyframes for one node. The node is referenced by name only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeAnimation {
    pub node_name: String,
    pub position_keys: Vec<VectorKey>,
    pub rotation_keys: Vec<QuatKey>,
    pub scaling_keys: Vec<VectorKey>,
}

impl NodeAnimation {
    pub fn new(node_name: impl Into<String>) -> Self {
        Self {
            node_name: node_name.into(),
            ..Default::default()
        }
    }

    /// Time of the latest key on any track.
    pub fn end_time(&self) -> f64 {
        let positions = self.position_keys.iter().map(|key| key.time);
        let rotations = self.rotation_keys.iter().map(|key| key.time);
        let scales = self.scaling_keys.iter().map(|key| key.time);
        positions.chain(rotations).chain(scales).fold(0.0, f64::max)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub name: String,
    /// Duration in ticks.
    pub duration: f64,
    pub ticks_per_second: f64,
    pub channels: Vec<NodeAnimation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_time_spans_all_tracks() {
        let mut channel = NodeAnimation::new("arm");
        channel.position_keys.push(VectorKey {
            time: 250.0,
            value: Vec3::ZERO,
        });
        channel.rotation_keys.push(QuatKey {
            time: 1000.0,
            value: Quat::IDENTITY,
        });
        assert_eq!(channel.end_time(), 1000.0);
        assert_eq!(NodeAnimation::new("idle").end_time(), 0.0);
    }
}
