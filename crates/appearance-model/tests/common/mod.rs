#![allow(dead_code)]

use std::{fs, path::Path};

pub fn push_f32s(buffer: &mut Vec<u8>, values: &[f32]) {
    for value in values {
        buffer.extend_from_slice(&value.to_le_bytes());
    }
}

pub fn push_u16s(buffer: &mut Vec<u8>, values: &[u16]) {
    for value in values {
        buffer.extend_from_slice(&value.to_le_bytes());
    }
}

pub fn push_u32s(buffer: &mut Vec<u8>, values: &[u32]) {
    for value in values {
        buffer.extend_from_slice(&value.to_le_bytes());
    }
}

/// Writes `rig.gltf` and `rig.bin` into `dir`: a root with an animated,
/// two-primitive quad arm and a leg with an unnamed child.
pub fn write_rig(dir: &Path) -> std::path::PathBuf {
    let mut bin = Vec::new();
    push_f32s(
        &mut bin,
        &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0],
    );
    push_f32s(&mut bin, &[0.0, 0.0, 1.0].repeat(4));
    push_f32s(&mut bin, &[0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0]);
    push_u16s(&mut bin, &[0, 1, 2, 0, 2, 3]);
    push_f32s(&mut bin, &[0.0, 1.0]);
    push_f32s(&mut bin, &[0.0, 0.0, 0.0, 0.0, 2.0, 0.0]);
    assert_eq!(bin.len(), 172);
    fs::write(dir.join("rig.bin"), &bin).unwrap();

    let json = r#"{
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [ { "nodes": [0] } ],
        "nodes": [
            { "name": "Root", "children": [1, 2] },
            { "name": "Arm", "mesh": 0, "translation": [1.0, 0.0, 0.0] },
            { "name": "Leg", "children": [3] },
            { }
        ],
        "meshes": [
            {
                "name": "Quad",
                "primitives": [
                    { "attributes": { "POSITION": 0, "NORMAL": 1, "TEXCOORD_0": 2 }, "indices": 3, "material": 0 },
                    { "attributes": { "POSITION": 0 }, "indices": 3 }
                ]
            }
        ],
        "materials": [
            { "name": "Painted", "pbrMetallicRoughness": { "baseColorTexture": { "index": 0 } } }
        ],
        "textures": [ { "source": 0 } ],
        "images": [ { "uri": "paint.png" } ],
        "animations": [
            {
                "name": "Wave",
                "channels": [ { "sampler": 0, "target": { "node": 1, "path": "translation" } } ],
                "samplers": [ { "input": 4, "output": 5, "interpolation": "LINEAR" } ]
            }
        ],
        "buffers": [ { "uri": "rig.bin", "byteLength": 172 } ],
        "bufferViews": [
            { "buffer": 0, "byteOffset": 0, "byteLength": 48 },
            { "buffer": 0, "byteOffset": 48, "byteLength": 48 },
            { "buffer": 0, "byteOffset": 96, "byteLength": 32 },
            { "buffer": 0, "byteOffset": 128, "byteLength": 12 },
            { "buffer": 0, "byteOffset": 140, "byteLength": 8 },
            { "buffer": 0, "byteOffset": 148, "byteLength": 24 }
        ],
        "accessors": [
            { "bufferView": 0, "componentType": 5126, "count": 4, "type": "VEC3", "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] },
            { "bufferView": 1, "componentType": 5126, "count": 4, "type": "VEC3" },
            { "bufferView": 2, "componentType": 5126, "count": 4, "type": "VEC2" },
            { "bufferView": 3, "componentType": 5123, "count": 6, "type": "SCALAR" },
            { "bufferView": 4, "componentType": 5126, "count": 2, "type": "SCALAR", "min": [0.0], "max": [1.0] },
            { "bufferView": 5, "componentType": 5126, "count": 2, "type": "VEC3" }
        ]
    }"#;

    let path = dir.join("rig.gltf");
    fs::write(&path, json).unwrap();
    path
}

/// Writes `skinned.gltf` and `skinned.bin` into `dir`: a skinned triangle and
/// its two joints, all three listed as scene roots.
pub fn write_skinned(dir: &Path) -> std::path::PathBuf {
    let mut bin = Vec::new();
    push_f32s(&mut bin, &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
    push_u16s(&mut bin, &[0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0]);
    push_f32s(
        &mut bin,
        &[
            1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.5, 0.5, 0.0, 0.0,
        ],
    );
    assert_eq!(bin.len(), 108);
    fs::write(dir.join("skinned.bin"), &bin).unwrap();

    let json = r#"{
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [ { "nodes": [0, 1, 2] } ],
        "nodes": [
            { "name": "Body", "mesh": 0, "skin": 0 },
            { "name": "J0" },
            { "name": "J1", "translation": [0.0, 1.0, 0.0] }
        ],
        "skins": [ { "joints": [1, 2] } ],
        "meshes": [
            { "name": "Tri", "primitives": [ { "attributes": { "POSITION": 0, "JOINTS_0": 1, "WEIGHTS_0": 2 } } ] }
        ],
        "buffers": [ { "uri": "skinned.bin", "byteLength": 108 } ],
        "bufferViews": [
            { "buffer": 0, "byteOffset": 0, "byteLength": 36 },
            { "buffer": 0, "byteOffset": 36, "byteLength": 24 },
            { "buffer": 0, "byteOffset": 60, "byteLength": 48 }
        ],
        "accessors": [
            { "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3", "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] },
            { "bufferView": 1, "componentType": 5123, "count": 3, "type": "VEC4" },
            { "bufferView": 2, "componentType": 5126, "count": 3, "type": "VEC4" }
        ]
    }"#;

    let path = dir.join("skinned.gltf");
    fs::write(&path, json).unwrap();
    path
}

fn push_chunk(glb: &mut Vec<u8>, kind: &[u8; 4], mut data: Vec<u8>, pad: u8) {
    while data.len() % 4 != 0 {
        data.push(pad);
    }
    push_u32s(glb, &[data.len() as u32]);
    glb.extend_from_slice(kind);
    glb.extend_from_slice(&data);
}

/// Writes `lid.glb` into `dir`: one textured triangle whose image lives in
/// the binary chunk.
pub fn write_glb(dir: &Path) -> std::path::PathBuf {
    let mut bin = Vec::new();
    push_f32s(&mut bin, &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
    bin.extend_from_slice(b"\x89PNG\r\n\x1a\n");
    assert_eq!(bin.len(), 44);

    let json = r#"{
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [ { "nodes": [0] } ],
        "nodes": [ { "name": "Lid", "mesh": 0 } ],
        "meshes": [ { "name": "Cap", "primitives": [ { "attributes": { "POSITION": 0 }, "material": 0 } ] } ],
        "materials": [ { "name": "Enamel", "pbrMetallicRoughness": { "baseColorTexture": { "index": 0 } } } ],
        "textures": [ { "source": 0 } ],
        "images": [ { "bufferView": 1, "mimeType": "image/png" } ],
        "buffers": [ { "byteLength": 44 } ],
        "bufferViews": [
            { "buffer": 0, "byteOffset": 0, "byteLength": 36 },
            { "buffer": 0, "byteOffset": 36, "byteLength": 8 }
        ],
        "accessors": [
            { "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3", "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] }
        ]
    }"#;

    let mut chunks = Vec::new();
    push_chunk(&mut chunks, b"JSON", json.as_bytes().to_vec(), b' ');
    push_chunk(&mut chunks, b"BIN\0", bin, 0);

    let mut glb = b"glTF".to_vec();
    push_u32s(&mut glb, &[2, (12 + chunks.len()) as u32]);
    glb.extend_from_slice(&chunks);

    let path = dir.join("lid.glb");
    fs::write(&path, glb).unwrap();
    path
}
