use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};
use ndarray::Array2;

use crate::error::{ReapError, Result};
use crate::io::stack::{StackHeader, STACK_DESCRIPTION_LEN, STACK_HEADER_SIZE, STACK_MAGIC};
use crate::scene::{Scene, SceneInfo};

/// Writes a stack file: header, rasters, then the scene table at finalize.
pub struct StackWriter {
    writer: BufWriter<File>,
    header: StackHeader,
    table: Vec<SceneInfo>,
}

impl StackWriter {
    /// Create a new stack file and write the header.
    pub fn create(path: &Path, header: &StackHeader) -> Result<Self> {
        if header.width == 0 || header.height == 0 {
            return Err(ReapError::InvalidDimensions {
                width: header.width,
                height: header.height,
            });
        }
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        write_header(&mut writer, header)?;
        Ok(Self {
            writer,
            header: header.clone(),
            table: Vec::with_capacity(header.scene_count as usize),
        })
    }

    /// Append one raster. Its shape must match the header.
    pub fn write_raster(&mut self, data: &Array2<f32>, info: SceneInfo) -> Result<()> {
        let (rows, cols) = data.dim();
        if rows != self.header.height as usize || cols != self.header.width as usize {
            return Err(ReapError::DimensionMismatch {
                source_name: "stack writer".into(),
                expected_rows: self.header.height as usize,
                expected_cols: self.header.width as usize,
                rows,
                cols,
            });
        }
        if self.table.len() >= self.header.scene_count as usize {
            return Err(ReapError::InvalidStack(format!(
                "Header declares {} scenes, refusing to write more",
                self.header.scene_count
            )));
        }
        // Iterates in logical (row-major) order regardless of memory layout.
        for &v in data.iter() {
            self.writer.write_f32::<LittleEndian>(v)?;
        }
        self.table.push(info);
        Ok(())
    }

    pub fn write_scene(&mut self, scene: &Scene) -> Result<()> {
        self.write_raster(&scene.data, scene.metadata.info)
    }

    /// Write the scene table, flush and finalize the file.
    pub fn finalize(mut self) -> Result<()> {
        if self.table.len() != self.header.scene_count as usize {
            return Err(ReapError::InvalidStack(format!(
                "Header declares {} scenes, {} written",
                self.header.scene_count,
                self.table.len()
            )));
        }
        for info in &self.table {
            self.writer
                .write_i64::<LittleEndian>(info.acquired.timestamp_millis())?;
            self.writer.write_i32::<LittleEndian>(info.sensor.code())?;
            self.writer.write_i32::<LittleEndian>(0)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

fn write_header(w: &mut impl Write, header: &StackHeader) -> Result<()> {
    // Magic (8 bytes)
    w.write_all(STACK_MAGIC)?;
    // Index kind (4 bytes)
    w.write_i32::<LittleEndian>(header.kind.code())?;
    // Width, height, scene count, year (4 bytes each)
    w.write_i32::<LittleEndian>(header.width as i32)?;
    w.write_i32::<LittleEndian>(header.height as i32)?;
    w.write_i32::<LittleEndian>(header.scene_count as i32)?;
    w.write_i32::<LittleEndian>(header.year)?;
    // Nodata (4 bytes)
    w.write_f32::<LittleEndian>(header.nodata)?;
    // Description (48 bytes)
    write_fixed_string(w, &header.description, STACK_DESCRIPTION_LEN)?;

    debug_assert_eq!(8 + 4 * 6 + STACK_DESCRIPTION_LEN, STACK_HEADER_SIZE);
    Ok(())
}

fn write_fixed_string(w: &mut impl Write, s: &str, len: usize) -> Result<()> {
    let bytes = s.as_bytes();
    let to_write = bytes.len().min(len);
    w.write_all(&bytes[..to_write])?;
    // Pad with zeros
    for _ in to_write..len {
        w.write_all(&[0u8])?;
    }
    Ok(())
}
