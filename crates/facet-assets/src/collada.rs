//! COLLADA (.dae) scene parser.
//!
//! Resolves the format's indirection layers (named `<float_array>`
//! sources, `<vertices>` semantic inputs, per-primitive index tuples)
//! down to the same intermediate representation the OBJ parser
//! produces. Only the first `<geometry>/<mesh>` and its first
//! `<triangles>` or `<polylist>` primitive are read.
//!
//! Scene polygons must already be triangles; unlike the OBJ path, no
//! triangulation is attempted here and a `<polylist>` entry with a
//! vertex count other than 3 is rejected.

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::AssetError;
use crate::geometry::{FaceVertex, RawMesh};

const DEFAULT_STRIDE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PrimitiveKind {
    Triangles,
    Polylist,
}

/// An `<input>` declaration of a primitive: semantic tag, offset into
/// the per-vertex index tuple, and source id (leading `#` stripped).
#[derive(Debug, Clone)]
struct InputDef {
    semantic: String,
    offset: usize,
    source: String,
}

#[derive(Debug)]
struct Primitive {
    kind: PrimitiveKind,
    inputs: Vec<InputDef>,
    indices: Vec<usize>,
    vcounts: Vec<usize>,
}

impl Primitive {
    fn new(kind: PrimitiveKind) -> Self {
        Self {
            kind,
            inputs: Vec::new(),
            indices: Vec::new(),
            vcounts: Vec::new(),
        }
    }
}

/// Raw document facts gathered by the event loop, before resolution.
#[derive(Default)]
struct Document {
    /// source id -> (flat float values, accessor stride)
    arrays: HashMap<String, (Vec<f32>, usize)>,
    /// vertices id -> POSITION source id
    vertex_positions: HashMap<String, String>,
    mesh_found: bool,
    primitive: Option<Primitive>,
}

/// Parse COLLADA XML text into the intermediate representation.
pub fn parse_collada(xml: &str) -> Result<RawMesh, AssetError> {
    let doc = scan_document(xml)?;
    resolve(doc)
}

/// Single pass over the XML events, collecting sources, the first
/// mesh's vertices mapping, and its first primitive.
fn scan_document(xml: &str) -> Result<Document, AssetError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut doc = Document::default();

    // Current <source> being read, if any.
    let mut source_id: Option<String> = None;
    let mut source_floats: Option<Vec<f32>> = None;
    let mut source_stride = DEFAULT_STRIDE;
    let mut in_float_array = false;

    // First <mesh> only.
    let mut in_mesh = false;
    let mut vertices_id: Option<String> = None;

    // Primitive currently being captured.
    let mut prim: Option<Primitive> = None;
    let mut in_indices = false;
    let mut in_vcount = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| AssetError::MalformedXml(e.to_string()))?;

        match &event {
            Event::Start(e) | Event::Empty(e) => {
                let empty = matches!(&event, Event::Empty(_));
                match e.local_name().as_ref() {
                    b"source" => {
                        if !empty {
                            source_id = attr(e, b"id");
                            source_floats = None;
                            source_stride = DEFAULT_STRIDE;
                        }
                    }
                    b"float_array" if source_id.is_some() => {
                        source_floats = Some(Vec::new());
                        in_float_array = !empty;
                    }
                    b"accessor" if source_id.is_some() => {
                        if let Some(value) = attr(e, b"stride") {
                            source_stride = parse_usize(&value, xml, &reader)?;
                        }
                    }
                    b"mesh" if !doc.mesh_found => {
                        doc.mesh_found = true;
                        in_mesh = !empty;
                    }
                    b"vertices" if in_mesh && !empty => {
                        vertices_id = attr(e, b"id");
                    }
                    b"input" => {
                        if let Some(id) = &vertices_id {
                            if attr(e, b"semantic").as_deref() == Some("POSITION") {
                                if let Some(src) = attr(e, b"source") {
                                    doc.vertex_positions
                                        .insert(id.clone(), strip_hash(&src));
                                }
                            }
                        } else if let Some(p) = prim.as_mut() {
                            p.inputs.push(read_input(e, xml, &reader)?);
                        }
                    }
                    b"triangles" | b"polylist"
                        if in_mesh && !empty && prim.is_none() && doc.primitive.is_none() =>
                    {
                        let kind = if e.local_name().as_ref() == b"triangles" {
                            PrimitiveKind::Triangles
                        } else {
                            PrimitiveKind::Polylist
                        };
                        prim = Some(Primitive::new(kind));
                    }
                    b"p" if prim.is_some() => in_indices = !empty,
                    b"vcount" if prim.is_some() => in_vcount = !empty,
                    _ => {}
                }
            }
            Event::Text(t) => {
                let text = t
                    .unescape()
                    .map_err(|e| AssetError::MalformedXml(e.to_string()))?;
                if in_float_array {
                    if let Some(floats) = source_floats.as_mut() {
                        for token in text.split_whitespace() {
                            let value =
                                token.parse().map_err(|_| AssetError::MalformedNumber {
                                    line: line_of(xml, &reader),
                                    token: token.to_string(),
                                })?;
                            floats.push(value);
                        }
                    }
                } else if in_indices || in_vcount {
                    if let Some(p) = prim.as_mut() {
                        let target = if in_indices {
                            &mut p.indices
                        } else {
                            &mut p.vcounts
                        };
                        for token in text.split_whitespace() {
                            target.push(parse_usize(token, xml, &reader)?);
                        }
                    }
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"source" => {
                    if let (Some(id), Some(floats)) = (source_id.take(), source_floats.take()) {
                        // Arrays narrower than a 3-vector carry no
                        // positions or normals; treat them like the
                        // non-float arrays we skip.
                        if source_stride >= 3 {
                            doc.arrays.insert(id, (floats, source_stride));
                        }
                    }
                }
                b"float_array" => in_float_array = false,
                b"mesh" => in_mesh = false,
                b"vertices" => vertices_id = None,
                b"triangles" | b"polylist" => {
                    if let Some(p) = prim.take() {
                        doc.primitive = Some(p);
                    }
                }
                b"p" => in_indices = false,
                b"vcount" => in_vcount = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(doc)
}

/// Resolve the collected document facts into a [`RawMesh`].
fn resolve(doc: Document) -> Result<RawMesh, AssetError> {
    if !doc.mesh_found {
        return Err(AssetError::MissingMesh);
    }
    let prim = doc.primitive.ok_or(AssetError::UnsupportedPrimitive)?;

    let vertex_input = prim
        .inputs
        .iter()
        .find(|i| i.semantic == "VERTEX")
        .ok_or_else(|| AssetError::MissingPositionSource("primitive has no VERTEX input".into()))?;

    // Values per index tuple.
    let stride = 1 + prim.inputs.iter().map(|i| i.offset).max().unwrap_or(0);

    // VERTEX redirects through the <vertices> element to the real array.
    let position_source = doc.vertex_positions.get(&vertex_input.source).ok_or_else(|| {
        AssetError::MissingPositionSource(format!("no <vertices> element '{}'", vertex_input.source))
    })?;
    let positions = doc.arrays.get(position_source).ok_or_else(|| {
        AssetError::MissingPositionSource(format!("no float source '{position_source}'"))
    })?;

    let normal_input = prim.inputs.iter().find(|i| i.semantic == "NORMAL");
    let normals = normal_input
        .map(|input| {
            doc.arrays.get(&input.source).ok_or_else(|| {
                AssetError::MalformedXml(format!("no float source '{}'", input.source))
            })
        })
        .transpose()?;

    let face_count = match prim.kind {
        PrimitiveKind::Triangles => prim.indices.len() / (stride * 3),
        PrimitiveKind::Polylist => {
            if let Some(&count) = prim.vcounts.iter().find(|&&c| c != 3) {
                return Err(AssetError::UnsupportedPolygonSize { count });
            }
            prim.vcounts.len()
        }
    };

    let mut mesh = RawMesh {
        positions: chunk_vec3(positions),
        normals: normals.map(chunk_vec3).unwrap_or_default(),
        faces: Vec::with_capacity(face_count),
    };

    let normal_offset = normal_input.map(|i| i.offset);
    for t in 0..face_count {
        let mut face = Vec::with_capacity(3);
        for v in 0..3 {
            let base = (t * 3 + v) * stride;
            let position = index_at(&prim.indices, base + vertex_input.offset)?;
            let normal = normal_offset
                .map(|off| index_at(&prim.indices, base + off))
                .transpose()?;
            // Scene indices are 0-based; the IR counts from 1.
            face.push(FaceVertex::new(position + 1, normal.map(|n| n + 1)));
        }
        mesh.faces.push(face);
    }

    Ok(mesh)
}

fn index_at(indices: &[usize], at: usize) -> Result<usize, AssetError> {
    indices
        .get(at)
        .copied()
        .ok_or_else(|| AssetError::MalformedXml("truncated <p> index list".into()))
}

/// Split a flat float array into 3-vectors, consuming values in
/// stride-sized groups. Strides wider than 3 keep only the leading
/// three components of each group.
fn chunk_vec3((values, stride): &(Vec<f32>, usize)) -> Vec<[f32; 3]> {
    values
        .chunks_exact(*stride)
        .map(|c| [c[0], c[1], c[2]])
        .collect()
}

fn read_input(
    e: &BytesStart<'_>,
    xml: &str,
    reader: &Reader<&[u8]>,
) -> Result<InputDef, AssetError> {
    let semantic = attr(e, b"semantic")
        .ok_or_else(|| AssetError::MalformedXml("<input> without semantic".into()))?;
    let offset = attr(e, b"offset")
        .ok_or_else(|| AssetError::MalformedXml(format!("<input {semantic}> without offset")))?;
    let source = attr(e, b"source")
        .ok_or_else(|| AssetError::MalformedXml(format!("<input {semantic}> without source")))?;
    Ok(InputDef {
        semantic,
        offset: parse_usize(&offset, xml, reader)?,
        source: strip_hash(&source),
    })
}

fn attr(e: &BytesStart<'_>, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == name)
        .map(|a| String::from_utf8_lossy(&a.value).into_owned())
}

fn strip_hash(source: &str) -> String {
    source.trim_start_matches('#').to_string()
}

fn parse_usize(token: &str, xml: &str, reader: &Reader<&[u8]>) -> Result<usize, AssetError> {
    token.parse().map_err(|_| AssetError::MalformedNumber {
        line: line_of(xml, reader),
        token: token.to_string(),
    })
}

/// 1-based line of the reader's current position, for error reports.
fn line_of(xml: &str, reader: &Reader<&[u8]>) -> usize {
    let pos = (reader.buffer_position() as usize).min(xml.len());
    xml[..pos].matches('\n').count() + 1
}
