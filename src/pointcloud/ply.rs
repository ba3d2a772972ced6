use super::*;
use crate::patterns::PatternError;
use crate::waypoint::Rgb;
use byteorder::BigEndian;
use byteorder::ByteOrder;
use byteorder::LittleEndian;
use byteorder::ReadBytesExt;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;
use std::marker::PhantomData;

/// PLY body encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Encoding {
    Ascii,
    Little,
    Big,
}

/// PLY scalar property types, under both their classic and sized names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scalar {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    F32,
    F64,
}

impl TryFrom<&str> for Scalar {
    type Error = PatternError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "char" | "int8" => Ok(Self::I8),
            "uchar" | "uint8" => Ok(Self::U8),
            "short" | "int16" => Ok(Self::I16),
            "ushort" | "uint16" => Ok(Self::U16),
            "int" | "int32" => Ok(Self::I32),
            "uint" | "uint32" => Ok(Self::U32),
            "float" | "float32" => Ok(Self::F32),
            "double" | "float64" => Ok(Self::F64),
            other => Err(invalid(format!("unknown property type '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Kind {
    Scalar(Scalar),
    List(Scalar, Scalar),
}

#[derive(Debug)]
struct Property {
    name: String,
    kind: Kind,
}

#[derive(Debug)]
struct Element {
    name: String,
    count: usize,
    properties: Vec<Property>,
}

impl Element {
    /// Index of the first scalar property answering to any of `names`.
    fn scalar(&self, names: &[&str]) -> Option<usize> {
        self.properties
            .iter()
            .position(|p| names.contains(&p.name.as_str()))
            .filter(|&i| matches!(self.properties[i].kind, Kind::Scalar(_)))
    }
}

/// Where position and color live within a vertex row.
struct Layout {
    xyz: [usize; 3],
    rgb: Option<[usize; 3]>,
}

#[derive(Debug)]
struct Header {
    encoding: Encoding,
    elements: Vec<Element>,
}

impl Header {
    fn read<R: BufRead>(reader: &mut R) -> Result<Self, PatternError> {
        let ref mut line = String::new();
        reader.read_line(line)?;
        if line.trim() != "ply" {
            return Err(invalid("missing 'ply' magic"));
        }
        let mut encoding = None;
        let mut elements = Vec::<Element>::new();
        loop {
            line.clear();
            if reader.read_line(line)? == 0 {
                return Err(invalid("header ended before 'end_header'"));
            }
            let words = line.split_whitespace().collect::<Vec<_>>();
            match words.as_slice() {
                ["end_header"] => break,
                [] | ["comment", ..] | ["obj_info", ..] => continue,
                ["format", "ascii", _] => encoding = Some(Encoding::Ascii),
                ["format", "binary_little_endian", _] => encoding = Some(Encoding::Little),
                ["format", "binary_big_endian", _] => encoding = Some(Encoding::Big),
                ["element", name, count] => elements.push(Element {
                    name: name.to_string(),
                    count: count
                        .parse()
                        .map_err(|_| invalid(format!("bad element count '{}'", count)))?,
                    properties: Vec::new(),
                }),
                ["property", "list", count, item, name] => elements
                    .last_mut()
                    .ok_or_else(|| invalid("property before any element"))?
                    .properties
                    .push(Property {
                        name: name.to_string(),
                        kind: Kind::List(Scalar::try_from(*count)?, Scalar::try_from(*item)?),
                    }),
                ["property", scalar, name] => elements
                    .last_mut()
                    .ok_or_else(|| invalid("property before any element"))?
                    .properties
                    .push(Property {
                        name: name.to_string(),
                        kind: Kind::Scalar(Scalar::try_from(*scalar)?),
                    }),
                _ => return Err(invalid(format!("unrecognized header line '{}'", line.trim()))),
            }
        }
        Ok(Self {
            encoding: encoding.ok_or_else(|| invalid("missing format line"))?,
            elements,
        })
    }

    fn layout(&self) -> Result<Layout, PatternError> {
        let vertex = self
            .elements
            .iter()
            .find(|e| e.name == "vertex")
            .ok_or_else(|| invalid("no vertex element"))?;
        let xyz = match (vertex.scalar(&["x"]), vertex.scalar(&["y"]), vertex.scalar(&["z"])) {
            (Some(x), Some(y), Some(z)) => [x, y, z],
            _ => return Err(invalid("vertex element missing x, y, z coordinates")),
        };
        let rgb = match (
            vertex.scalar(&["red", "diffuse_red", "r"]),
            vertex.scalar(&["green", "diffuse_green", "g"]),
            vertex.scalar(&["blue", "diffuse_blue", "b"]),
        ) {
            (Some(r), Some(g), Some(b)) => Some([r, g, b]),
            _ => None,
        };
        Ok(Layout { xyz, rgb })
    }
}

/// Source of successive property values, whatever the body encoding.
trait Values {
    fn next(&mut self, scalar: Scalar) -> Result<f64, PatternError>;
}

struct Ascii<'a>(std::str::SplitWhitespace<'a>);

impl Values for Ascii<'_> {
    fn next(&mut self, _: Scalar) -> Result<f64, PatternError> {
        let token = self
            .0
            .next()
            .ok_or_else(|| invalid("unexpected end of ascii data"))?;
        token
            .parse::<f64>()
            .map_err(|_| invalid(format!("bad number '{}'", token)))
    }
}

struct Binary<R, B> {
    reader: R,
    order: PhantomData<B>,
}

impl<R, B> Binary<R, B> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            order: PhantomData,
        }
    }
}

impl<R: Read, B: ByteOrder> Values for Binary<R, B> {
    fn next(&mut self, scalar: Scalar) -> Result<f64, PatternError> {
        let ref mut r = self.reader;
        Ok(match scalar {
            Scalar::I8 => r.read_i8()? as f64,
            Scalar::U8 => r.read_u8()? as f64,
            Scalar::I16 => r.read_i16::<B>()? as f64,
            Scalar::U16 => r.read_u16::<B>()? as f64,
            Scalar::I32 => r.read_i32::<B>()? as f64,
            Scalar::U32 => r.read_u32::<B>()? as f64,
            Scalar::F32 => r.read_f32::<B>()? as f64,
            Scalar::F64 => r.read_f64::<B>()?,
        })
    }
}

/// Read one row of `element` into `row`; list properties are consumed and recorded as NaN.
fn row<V: Values>(element: &Element, values: &mut V, row: &mut Vec<f64>) -> Result<(), PatternError> {
    row.clear();
    for property in element.properties.iter() {
        match property.kind {
            Kind::Scalar(scalar) => row.push(values.next(scalar)?),
            Kind::List(count, item) => {
                let n = values.next(count)?;
                if n.is_nan() || n < 0.0 {
                    return Err(invalid(format!("bad list length {}", n)));
                }
                for _ in 0..n as usize {
                    values.next(item)?;
                }
                row.push(f64::NAN);
            }
        }
    }
    Ok(())
}

fn body<V: Values>(header: &Header, values: &mut V, fallback: Rgb) -> Result<PointCloud, PatternError> {
    let layout = header.layout()?;
    if layout.rgb.is_none() {
        log::warn!("[pointcloud] no per-vertex color, using {}", fallback);
    }
    let ref mut buffer = Vec::new();
    for element in header.elements.iter() {
        if element.name != "vertex" {
            for _ in 0..element.count {
                row(element, values, buffer)?;
            }
            continue;
        }
        let mut points = Vec::with_capacity(element.count.min(1 << 16));
        for _ in 0..element.count {
            row(element, values, buffer)?;
            let xyz = layout.xyz.map(|i| buffer[i]);
            let rgb = layout
                .rgb
                .map(|[r, g, b]| Rgb::new(buffer[r], buffer[g], buffer[b]))
                .unwrap_or(fallback);
            points.push(Point::new(xyz, rgb));
        }
        return Ok(PointCloud::new(points));
    }
    Err(invalid("no vertex element"))
}

impl PointCloud {
    /// Load a PLY file (ascii or binary, either byte order).
    /// Colors are returned as stored; clouds without color use `fallback`.
    pub fn load(path: &std::path::Path, fallback: Rgb) -> Result<Self, PatternError> {
        if !path.exists() {
            return Err(PatternError::NotFound(path.to_path_buf()));
        }
        log::info!("[pointcloud] loading {}", path.display());
        let file = std::fs::File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => PatternError::NotFound(path.to_path_buf()),
            _ => PatternError::Io(e),
        })?;
        let cloud = Self::read(BufReader::new(file), fallback)?;
        log::info!("[pointcloud] loaded {} points", cloud.len());
        Ok(cloud)
    }

    /// Parse PLY from any buffered reader.
    pub fn read<R: BufRead>(mut reader: R, fallback: Rgb) -> Result<Self, PatternError> {
        let header = Header::read(&mut reader)?;
        match header.encoding {
            Encoding::Ascii => {
                let ref mut text = String::new();
                reader.read_to_string(text)?;
                body(&header, &mut Ascii(text.split_whitespace()), fallback)
            }
            Encoding::Little => body(&header, &mut Binary::<_, LittleEndian>::new(reader), fallback),
            Encoding::Big => body(&header, &mut Binary::<_, BigEndian>::new(reader), fallback),
        }
    }
}

fn invalid<S: Into<String>>(reason: S) -> PatternError {
    PatternError::InvalidFormat(reason.into())
}
