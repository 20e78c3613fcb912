use std::fs::File;
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};
use memmap2::Mmap;
use ndarray::Array2;

use crate::consts::SENTINEL;
use crate::doy::timestamp_from_millis;
use crate::error::{ReapError, Result};
use crate::scene::{IndexKind, Scene, SceneInfo, SceneMetadata, Sensor, StackSummary};

pub const STACK_HEADER_SIZE: usize = 80;
pub const STACK_MAGIC: &[u8; 8] = b"REAPSTK1";
pub const STACK_DESCRIPTION_LEN: usize = 48;
/// Bytes per scene-table entry: i64 timestamp, i32 sensor, i32 reserved.
pub const SCENE_TABLE_ENTRY_SIZE: usize = 16;

/// Stack file header (80 bytes).
#[derive(Clone, Debug)]
pub struct StackHeader {
    pub kind: IndexKind,
    pub width: u32,
    pub height: u32,
    pub scene_count: u32,
    pub year: i32,
    pub nodata: f32,
    pub description: String,
}

impl StackHeader {
    pub fn new(kind: IndexKind, width: u32, height: u32, scene_count: u32, year: i32) -> Self {
        Self {
            kind,
            width,
            height,
            scene_count,
            year,
            nodata: SENTINEL,
            description: String::new(),
        }
    }

    // Sizes saturate so that absurd headers fail the truncation check in
    // `StackReader::open` instead of overflowing.
    pub fn pixel_count(&self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    /// Total bytes per scene raster.
    pub fn scene_byte_size(&self) -> usize {
        self.pixel_count().saturating_mul(std::mem::size_of::<f32>())
    }

    /// Offset of the scene table that follows the rasters.
    pub fn table_offset(&self) -> usize {
        self.scene_byte_size()
            .saturating_mul(self.scene_count as usize)
            .saturating_add(STACK_HEADER_SIZE)
    }

    pub fn file_size(&self) -> usize {
        (SCENE_TABLE_ENTRY_SIZE * self.scene_count as usize).saturating_add(self.table_offset())
    }
}

/// Memory-mapped time-stack reader.
pub struct StackReader {
    mmap: Mmap,
    pub header: StackHeader,
    scenes: Vec<SceneInfo>,
}

impl StackReader {
    /// Open a stack file, parse its header and scene table.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };

        if mmap.len() < STACK_HEADER_SIZE {
            return Err(ReapError::InvalidStack(
                "File too small for stack header".into(),
            ));
        }

        if &mmap[0..8] != STACK_MAGIC {
            return Err(ReapError::InvalidStack("Missing REAPSTK1 magic".into()));
        }

        let header = parse_header(&mmap[..STACK_HEADER_SIZE])?;

        let expected_size = header.file_size();
        if mmap.len() < expected_size {
            return Err(ReapError::InvalidStack(format!(
                "File truncated: expected at least {} bytes, got {}",
                expected_size,
                mmap.len()
            )));
        }

        let scenes = parse_scene_table(
            &mmap[header.table_offset()..expected_size],
            header.scene_count as usize,
        )?;

        Ok(Self {
            mmap,
            header,
            scenes,
        })
    }

    pub fn scene_count(&self) -> usize {
        self.header.scene_count as usize
    }

    pub fn kind(&self) -> IndexKind {
        self.header.kind
    }

    pub fn scene_infos(&self) -> &[SceneInfo] {
        &self.scenes
    }

    pub fn scene_info(&self, index: usize) -> Result<SceneInfo> {
        self.scenes
            .get(index)
            .copied()
            .ok_or(ReapError::SceneIndexOutOfRange {
                index,
                total: self.scene_count(),
            })
    }

    /// Get the raw bytes for a single scene (zero-copy from mmap).
    pub fn scene_raw(&self, index: usize) -> Result<&[u8]> {
        let count = self.scene_count();
        if index >= count {
            return Err(ReapError::SceneIndexOutOfRange {
                index,
                total: count,
            });
        }
        let offset = STACK_HEADER_SIZE + index * self.header.scene_byte_size();
        let end = offset + self.header.scene_byte_size();
        Ok(&self.mmap[offset..end])
    }

    /// Read a single scene. Nodata and NaN pixels become [`SENTINEL`].
    pub fn read_scene(&self, index: usize) -> Result<Scene> {
        let raw = self.scene_raw(index)?;
        let info = self.scene_info(index)?;
        let h = self.header.height as usize;
        let w = self.header.width as usize;

        let mut values = vec![0.0f32; h * w];
        LittleEndian::read_f32_into(raw, &mut values);
        let nodata = self.header.nodata;
        for v in values.iter_mut() {
            if v.is_nan() || *v == nodata {
                *v = SENTINEL;
            }
        }

        let data = Array2::from_shape_vec((h, w), values)
            .map_err(|e| ReapError::InvalidStack(e.to_string()))?;

        Ok(Scene {
            data,
            metadata: SceneMetadata {
                kind: self.header.kind,
                info,
                scene_index: index,
            },
        })
    }

    /// Build a StackSummary from the header.
    pub fn summary(&self, path: &Path) -> StackSummary {
        StackSummary {
            filename: path.to_path_buf(),
            kind: self.header.kind,
            total_scenes: self.scene_count(),
            width: self.header.width,
            height: self.header.height,
            year: self.header.year,
            nodata: self.header.nodata,
            description: non_empty(&self.header.description),
        }
    }

    /// Iterator over all scenes.
    pub fn scenes(&self) -> impl Iterator<Item = Result<Scene>> + '_ {
        (0..self.scene_count()).map(move |i| self.read_scene(i))
    }
}

fn parse_header(buf: &[u8]) -> Result<StackHeader> {
    let mut cursor = std::io::Cursor::new(&buf[8..]); // skip magic

    let kind_code = cursor.read_i32::<LittleEndian>()?;
    let width = cursor.read_i32::<LittleEndian>()?;
    let height = cursor.read_i32::<LittleEndian>()?;
    let scene_count = cursor.read_i32::<LittleEndian>()?;
    let year = cursor.read_i32::<LittleEndian>()?;
    let nodata = cursor.read_f32::<LittleEndian>()?;

    let description = read_fixed_string(&buf[32..32 + STACK_DESCRIPTION_LEN]);

    let kind = IndexKind::from_code(kind_code)
        .ok_or_else(|| ReapError::InvalidStack(format!("Unknown index kind {}", kind_code)))?;

    if width <= 0 || height <= 0 {
        return Err(ReapError::InvalidDimensions {
            width: width.max(0) as u32,
            height: height.max(0) as u32,
        });
    }

    if scene_count < 0 {
        return Err(ReapError::InvalidStack(format!(
            "Negative scene count {}",
            scene_count
        )));
    }

    Ok(StackHeader {
        kind,
        width: width as u32,
        height: height as u32,
        scene_count: scene_count as u32,
        year,
        nodata,
        description,
    })
}

fn parse_scene_table(buf: &[u8], count: usize) -> Result<Vec<SceneInfo>> {
    let mut cursor = std::io::Cursor::new(buf);
    let mut scenes = Vec::with_capacity(count);
    for _ in 0..count {
        let millis = cursor.read_i64::<LittleEndian>()?;
        let sensor = cursor.read_i32::<LittleEndian>()?;
        let _reserved = cursor.read_i32::<LittleEndian>()?;
        scenes.push(SceneInfo::new(
            timestamp_from_millis(millis)?,
            Sensor::from_code(sensor),
        ));
    }
    Ok(scenes)
}

fn read_fixed_string(buf: &[u8]) -> String {
    String::from_utf8_lossy(buf)
        .trim_end_matches('\0')
        .trim()
        .to_string()
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}
