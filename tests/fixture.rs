//! A synthetic 1065 point dataset, read and rewritten both uncompressed and compressed.

use std::{io::Cursor, sync::Arc};

use chrono::NaiveDate;
use lasio::{
    Color, Error, Header, Point, Reader, ReaderOptions, Result, Transform, Vector, Version, Vlr,
    Writer, WriterOptions,
    codec::Codec,
    point::{Class, Classification, Format},
};
use uuid::Uuid;

const NUMBER_OF_POINTS: u32 = 1065;
const GUID: &str = "D59B08E7-79EE-47E4-AAE1-2B8DE4B87331";

/// Flips every bit of the records. Enough to prove the records went through the codec.
#[derive(Debug)]
struct Xor(u8);

impl Codec for Xor {
    fn is_codec_vlr(&self, vlr: &Vlr) -> bool {
        vlr.is("xor test codec", 1)
    }

    fn vlr(&self, _: &Format) -> Result<Vlr> {
        Ok(Vlr {
            user_id: "xor test codec".to_string(),
            record_id: 1,
            description: "records xor'd with one byte".to_string(),
            data: vec![self.0],
            ..Default::default()
        })
    }

    fn decode_stream(&self, header: &Header, bytes: &[u8]) -> Result<Vec<u8>> {
        let vlr = header
            .vlrs()
            .iter()
            .find(|vlr| self.is_codec_vlr(vlr))
            .ok_or(Error::CompressionUnsupported)?;
        assert_eq!(vec![self.0], vlr.data);
        Ok(bytes.iter().map(|b| b ^ self.0).collect())
    }

    fn encode_stream(&self, _: &Header, records: &[u8]) -> Result<Vec<u8>> {
        Ok(records.iter().map(|b| b ^ self.0).collect())
    }
}

fn xor() -> Arc<dyn Codec> {
    Arc::new(Xor(0xff))
}

fn point(i: u32) -> Point {
    if i == 2 {
        return Point {
            x: 636784.74,
            y: 849106.66,
            z: 426.71,
            intensity: 118,
            return_number: 1,
            number_of_returns: 1,
            classification: Classification::try_from(Class::Unclassified).unwrap(),
            gps_time: Some(245382.13595),
            color: Some(Color::new(112, 97, 114)),
            ..Default::default()
        };
    }
    let class = if i % 2 == 0 {
        Class::Ground
    } else {
        Class::Unclassified
    };
    Point {
        x: 636000. + f64::from(i) * 0.5,
        y: 849000. + f64::from(i) * 0.25,
        z: 400. + f64::from(i % 50),
        intensity: (i % 1000) as u16,
        return_number: 1 + (i % 3) as u8,
        number_of_returns: 3,
        classification: Classification::try_from(class).unwrap(),
        point_source_id: 7,
        gps_time: Some(245000. + f64::from(i) / 8.),
        color: Some(Color::new(i as u16, (i * 2) as u16, (i * 3) as u16)),
        ..Default::default()
    }
}

fn header() -> Header {
    let mut header = Header::default();
    header.set_version(Version::new(1, 2)).unwrap();
    header.set_point_format(Format::new(3).unwrap()).unwrap();
    header.set_guid(Uuid::parse_str(GUID).unwrap());
    header
        .set_transforms(Vector::splat(Transform {
            scale: 0.01,
            offset: 0.,
        }))
        .unwrap();
    header.set_date(NaiveDate::from_ymd_opt(2011, 2, 1).unwrap()).unwrap();
    header
}

fn uncompressed() -> Cursor<Vec<u8>> {
    let mut writer = Writer::new(Cursor::new(Vec::new()), header()).unwrap();
    for i in 0..NUMBER_OF_POINTS {
        writer.write_point(point(i)).unwrap();
    }
    writer.into_inner().unwrap()
}

/// Rewrites the data with `compressed`, returning the new bytes.
fn rewrite(
    read: Cursor<Vec<u8>>,
    codec: Arc<dyn Codec>,
    compressed: bool,
    date: Option<NaiveDate>,
) -> Cursor<Vec<u8>> {
    let mut reader =
        Reader::with_options(read, ReaderOptions::default().with_codec(codec.clone())).unwrap();
    let mut header = reader.header().clone();
    header.set_compressed(compressed);
    if let Some(date) = date {
        header.set_date(date).unwrap();
    }
    let mut writer = Writer::with_options(
        Cursor::new(Vec::new()),
        header,
        WriterOptions::default().with_codec(codec),
    )
    .unwrap();
    for point in reader.points() {
        writer.write_point(point.unwrap()).unwrap();
    }
    writer.into_inner().unwrap()
}

fn reader(read: Cursor<Vec<u8>>, codec: Arc<dyn Codec>) -> Reader {
    Reader::with_options(read, ReaderOptions::default().with_codec(codec)).unwrap()
}

fn assert_point_2(point: &Point) {
    assert!((point.x - 636784.74).abs() < 0.01);
    assert!((point.y - 849106.66).abs() < 0.01);
    assert!((point.z - 426.71).abs() < 0.01);
    assert_eq!(118, point.intensity);
    assert_eq!("Unclassified", point.classification.name());
    assert_eq!(Some(Color::new(112, 97, 114)), point.color);
    assert!((point.gps_time.unwrap() - 245382.13595).abs() < 1e-9);
}

#[test]
fn uncompressed_point_2() {
    let mut reader = Reader::new(uncompressed()).unwrap();
    let header = reader.header();
    assert_eq!(u64::from(NUMBER_OF_POINTS), header.number_of_points());
    assert!(!header.is_compressed());
    assert!(header.vlrs().is_empty());
    assert_eq!(Version::new(1, 2), header.version());
    assert_eq!(34, header.point_format().len());
    assert_point_2(&reader.read_point_at(2).unwrap());
}

#[test]
fn compressed_point_2() {
    let compressed = rewrite(uncompressed(), xor(), true, None);
    assert_ne!(uncompressed().into_inner(), compressed.get_ref()[..].to_vec());
    let mut reader = reader(compressed, xor());
    let header = reader.header();
    assert!(header.is_compressed());
    assert_eq!(1, header.vlrs().len());
    assert_eq!(u64::from(NUMBER_OF_POINTS), header.number_of_points());
    assert_point_2(&reader.read_point_at(2).unwrap());
}

#[test]
fn compressed_points_match_uncompressed() {
    let mut uncompressed_reader = Reader::new(uncompressed()).unwrap();
    let mut compressed_reader = reader(rewrite(uncompressed(), xor(), true, None), xor());
    let expected = uncompressed_reader.read_points(u64::MAX).unwrap();
    let actual = compressed_reader.read_points(u64::MAX).unwrap();
    assert_eq!(NUMBER_OF_POINTS as usize, actual.len());
    assert_eq!(expected, actual);
}

#[test]
fn clone_compress_rewrite() {
    let compressed = rewrite(uncompressed(), xor(), true, None);
    let date = NaiveDate::from_ymd_opt(2020, 7, 4).unwrap();
    let rewritten = rewrite(compressed, xor(), true, Some(date));

    let mut reader = reader(rewritten, xor());
    let header = reader.header();
    assert!(header.is_compressed());
    assert_eq!(u64::from(NUMBER_OF_POINTS), header.number_of_points());
    assert_eq!(1, header.vlrs().len());
    assert_eq!(GUID.to_lowercase(), header.guid().to_string());
    assert_eq!(Some(date), header.date());
    assert_eq!(186, header.file_creation_day_of_year());
    assert_eq!(u64::from(NUMBER_OF_POINTS), reader.points().count() as u64);
}

#[test]
fn decompress_drops_the_codec_vlr() {
    let compressed = rewrite(uncompressed(), xor(), true, None);
    let decompressed = rewrite(compressed, xor(), false, None);
    let mut reader = Reader::new(decompressed).unwrap();
    assert!(!reader.header().is_compressed());
    assert!(reader.header().vlrs().is_empty());
    assert_point_2(&reader.read_point_at(2).unwrap());
}

#[test]
fn random_access_keeps_the_cursor() {
    let mut reader = reader(rewrite(uncompressed(), xor(), true, None), xor());
    let _ = reader.read_point_at(1000).unwrap();
    let next = reader.read_point().unwrap().unwrap();
    assert_eq!(point(1001).intensity, next.intensity);
    assert_eq!(point(1001).gps_time, next.gps_time);
    assert_point_2(&reader.read_point_at(2).unwrap());
    assert_eq!(point(3).color, reader.read_point().unwrap().unwrap().color);
}

#[test]
fn compressed_without_a_codec() {
    let compressed = rewrite(uncompressed(), xor(), true, None);
    assert!(matches!(
        Reader::with_options(compressed, ReaderOptions::default().without_codec()),
        Err(Error::CompressionUnsupported)
    ));
}

#[test]
fn bounds_and_returns() {
    let reader = Reader::new(uncompressed()).unwrap();
    let header = reader.header();
    let bounds = header.bounds();
    assert_eq!(636000., bounds.min.x);
    assert!((bounds.max.x - 636784.74).abs() < 0.01);
    assert_eq!(849000., bounds.min.y);
    assert_eq!(400., bounds.min.z);
    assert!((bounds.max.z - 449.).abs() < 0.01);
    let by_return = header.number_of_points_by_return();
    assert_eq!(u64::from(NUMBER_OF_POINTS), by_return.iter().sum::<u64>());
    assert_eq!(0, by_return[3]);
    assert_eq!(0, by_return[4]);
}

#[cfg(feature = "laz")]
mod laszip {
    use super::*;
    use lasio::laz::{LasZip, is_laszip_vlr};

    fn laszip() -> Arc<dyn Codec> {
        Arc::new(LasZip)
    }

    #[test]
    fn compressed_point_2() {
        let compressed = rewrite(uncompressed(), laszip(), true, None);
        let mut reader = reader(compressed, laszip());
        assert!(reader.header().is_compressed());
        assert_eq!(1, reader.header().vlrs().len());
        assert!(is_laszip_vlr(reader.header().vlrs().get(0).unwrap()));
        assert_point_2(&reader.read_point_at(2).unwrap());
    }

    #[test]
    fn clone_compress_rewrite() {
        let compressed = rewrite(uncompressed(), laszip(), true, None);
        let date = NaiveDate::from_ymd_opt(2020, 7, 4).unwrap();
        let rewritten = rewrite(compressed, laszip(), true, Some(date));
        let mut reader = reader(rewritten, laszip());
        let header = reader.header();
        assert_eq!(u64::from(NUMBER_OF_POINTS), header.number_of_points());
        assert_eq!(1, header.vlrs().len());
        assert_eq!(GUID.to_lowercase(), header.guid().to_string());

        let mut expected = Reader::new(uncompressed()).unwrap();
        assert_eq!(
            expected.read_points(u64::MAX).unwrap(),
            reader.read_points(u64::MAX).unwrap()
        );
    }
}
