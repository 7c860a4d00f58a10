// Copyright @yucwang 2026

use crate::math::constants::Vector3f;
use crate::math::triangle::Triangle;

use std::fs;
use std::path::Path;

use wavefront_obj::{obj, ParseError};
use std::fmt;

#[derive(Debug)]
pub enum ObjLoadError {
    Io(std::io::Error),
    Parse(ParseError),
}

impl From<std::io::Error> for ObjLoadError {
    fn from(err: std::io::Error) -> Self {
        ObjLoadError::Io(err)
    }
}

impl From<ParseError> for ObjLoadError {
    fn from(err: ParseError) -> Self {
        ObjLoadError::Parse(err)
    }
}

impl fmt::Display for ObjLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjLoadError::Io(err) => write!(f, "io error: {}", err),
            ObjLoadError::Parse(err) => write!(f, "parse error: {}", err),
        }
    }
}

impl std::error::Error for ObjLoadError {}

pub fn load_obj_from_str<S: AsRef<str>>(input: S) -> Result<obj::ObjSet, ParseError> {
    let triangulated = triangulate_faces(input.as_ref());
    obj::parse(triangulated)
}

// Flattens every object in the set into one local-space triangle list.
pub fn load_triangles_from_str<S: AsRef<str>>(input: S) -> Result<Vec<Triangle>, ParseError> {
    let obj_set = load_obj_from_str(input)?;
    let mut triangles = Vec::new();
    for object in obj_set.objects {
        let vertices: Vec<Vector3f> = object.vertices.iter()
            .map(|v| Vector3f::new(v.x as f32, v.y as f32, v.z as f32))
            .collect();
        for geom in object.geometry {
            for shape in geom.shapes {
                if let wavefront_obj::obj::Primitive::Triangle(a, b, c) = shape.primitive {
                    let p0 = vertices[a.0 as usize];
                    let p1 = vertices[b.0 as usize];
                    let p2 = vertices[c.0 as usize];
                    triangles.push(Triangle::new(p0, p1, p2));
                }
            }
        }
    }
    Ok(triangles)
}

pub fn load_triangles_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Triangle>, ObjLoadError> {
    let data = fs::read_to_string(path)?;
    let triangles = load_triangles_from_str(data)?;
    Ok(triangles)
}

fn triangulate_faces(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 4);
    for line in input.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("f ") || trimmed.starts_with("f\t") {
            let parts: Vec<&str> = trimmed.split_whitespace().collect();
            if parts.len() > 4 {
                let base = parts[1];
                for i in 2..(parts.len() - 1) {
                    out.push_str("f ");
                    out.push_str(base);
                    out.push(' ');
                    out.push_str(parts[i]);
                    out.push(' ');
                    out.push_str(parts[i + 1]);
                    out.push('\n');
                }
                continue;
            }
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}
