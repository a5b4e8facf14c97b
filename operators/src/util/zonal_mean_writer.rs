use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::processing::zonal_statistics::ZonalMean;
use crate::util::Result;

/// Writes zonal means as space-delimited records of `centroid-x centroid-y value TAG`.
///
/// Coordinates have four decimals and values six, e.g. `13.4050 52.5200 281.250000 ERA`.
/// A tag containing spaces is quoted so every record keeps four fields.
#[derive(Debug)]
pub struct ZonalMeanWriter<W: Write> {
    writer: csv::Writer<W>,
    tag: String,
}

impl ZonalMeanWriter<BufWriter<File>> {
    /// Creates or truncates the file at `path`
    pub fn create(path: &Path, tag: impl Into<String>) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file), tag))
    }
}

impl<W: Write> ZonalMeanWriter<W> {
    pub fn new(writer: W, tag: impl Into<String>) -> Self {
        let writer = csv::WriterBuilder::new()
            .delimiter(b' ')
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);

        Self {
            writer,
            tag: tag.into(),
        }
    }

    pub fn write_mean(&mut self, mean: &ZonalMean) -> Result<()> {
        // values are stored in single precision
        let value = mean.value as f32;

        self.writer.write_record([
            format!("{:.4}", mean.centroid.x).as_str(),
            format!("{:.4}", mean.centroid.y).as_str(),
            format!("{value:.6}").as_str(),
            self.tag.as_str(),
        ])?;

        Ok(())
    }

    pub fn write_means<'m>(&mut self, means: impl IntoIterator<Item = &'m ZonalMean>) -> Result<()> {
        for mean in means {
            self.write_mean(mean)?;
        }
        Ok(())
    }

    /// Flushes and returns the underlying writer
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        let mut inner = self
            .writer
            .into_inner()
            .map_err(csv::IntoInnerError::into_error)?;
        inner.flush()?;
        Ok(inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn mean(x: f64, y: f64, value: f64) -> ZonalMean {
        ZonalMean {
            feature_id: 0,
            centroid: (x, y).into(),
            value,
            contributing_cells: 1,
            coverage: 1.,
        }
    }

    #[test]
    fn formats_lines() {
        let mut writer = ZonalMeanWriter::new(Vec::new(), "ERA");

        writer
            .write_means(&[mean(13.405, 52.52, 281.25), mean(-0.123_456, 1.0, -3.5)])
            .unwrap();

        let output = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(
            output,
            "13.4050 52.5200 281.250000 ERA\n-0.1235 1.0000 -3.500000 ERA\n"
        );
    }

    #[test]
    fn quotes_tags_with_spaces() {
        let mut writer = ZonalMeanWriter::new(Vec::new(), "ERA 5");

        writer.write_mean(&mean(1., 1., 2.)).unwrap();

        let output = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(output, "1.0000 1.0000 2.000000 \"ERA 5\"\n");

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b' ')
            .has_headers(false)
            .from_reader(output.as_bytes());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(record.len(), 4);
        assert_eq!(&record[3], "ERA 5");
    }

    #[test]
    fn writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("2024-01-01.csv");

        let mut writer = ZonalMeanWriter::create(&path, "TEST").unwrap();
        writer.write_mean(&mean(1., 2., 3.)).unwrap();
        writer.finish().unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "1.0000 2.0000 3.000000 TEST\n"
        );
    }
}
