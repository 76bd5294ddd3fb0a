//! End-to-end artifact scenarios: write a heterogeneous bundle, read it
//! back, and exercise every reader failure mode against real artifacts.

mod common;

use common::{
    fixture_registry, init_tracing, sample_artifact, sample_creatures, sample_waypoints, Creature,
    Waypoint,
};
use entitybin::prelude::*;
use entitybin::{DESCRIPTOR_SIZE, TAG_MAX_LEN};

#[test]
fn test_round_trip_two_sections() {
    init_tracing();
    let artifact = sample_artifact();

    let mut source = MemorySource::new(artifact);
    let mut bundle = BundleReader::read(&mut source, &fixture_registry()).unwrap();

    assert_eq!(bundle.len(), 2);
    let tags: Vec<_> = bundle.tags().map(str::to_owned).collect();
    assert_eq!(tags, vec!["Creature", "Waypoint"]);

    assert_eq!(bundle.take::<Creature>().unwrap(), sample_creatures());
    assert_eq!(bundle.take::<Waypoint>().unwrap(), sample_waypoints());
}

#[test]
fn test_artifact_prefix_layout() {
    let artifact = sample_artifact();

    // section count
    assert_eq!(&artifact[0..8], &2u64.to_le_bytes());

    // descriptor 0: two creatures, nominal header size, tag
    assert_eq!(&artifact[8..12], &2u32.to_le_bytes());
    assert_eq!(&artifact[12..16], &10u32.to_le_bytes());
    assert_eq!(&artifact[16..24], b"Creature");
    assert_eq!(artifact[24], 0);

    // descriptor 1: three waypoints, u32 + 2 x f32 at 4-byte alignment
    let d1 = 8 + DESCRIPTOR_SIZE;
    assert_eq!(&artifact[d1..d1 + 4], &3u32.to_le_bytes());
    assert_eq!(&artifact[d1 + 4..d1 + 8], &12u32.to_le_bytes());
    assert_eq!(&artifact[d1 + 8..d1 + 16], b"Waypoint");
}

#[test]
fn test_descriptor_totals_account_for_every_payload_byte() {
    let artifact = sample_artifact();

    // creature payloads: 1 + 1 + 8 + name_len each
    let creature_bytes: usize = sample_creatures()
        .iter()
        .map(|c| 10 + c.name.len())
        .sum();
    let waypoint_bytes = sample_waypoints().len() * 12;

    assert_eq!(
        artifact.len() - 8 - 2 * DESCRIPTOR_SIZE,
        creature_bytes + waypoint_bytes
    );
}

#[test]
fn test_empty_sequences_are_dropped() {
    let mut sink = MemorySink::new();
    BundleWriter::new()
        .section::<Creature>(&[])
        .unwrap()
        .section(&sample_waypoints())
        .unwrap()
        .write_to(&mut sink)
        .unwrap();
    let artifact = sink.into_bytes();

    assert_eq!(&artifact[0..8], &1u64.to_le_bytes());
    assert_eq!(artifact.len(), 8 + DESCRIPTOR_SIZE + 3 * 12);

    let mut source = MemorySource::new(artifact);
    let mut bundle = BundleReader::read(&mut source, &fixture_registry()).unwrap();
    assert_eq!(bundle.len(), 1);
    assert!(bundle.take::<Creature>().is_none());
    assert_eq!(bundle.take::<Waypoint>().unwrap(), sample_waypoints());
}

#[test]
fn test_empty_bundle_is_eight_bytes_and_reads_back_empty() {
    let mut sink = MemorySink::new();
    let written = BundleWriter::new().write_to(&mut sink).unwrap();
    let artifact = sink.into_bytes();

    assert_eq!(written, 8);
    assert_eq!(artifact, 0u64.to_le_bytes());

    let mut source = MemorySource::new(artifact);
    let bundle = BundleReader::read(&mut source, &fixture_registry()).unwrap();
    assert!(bundle.is_empty());
}

#[test]
fn test_truncated_artifact_fails_at_second_section() {
    let mut artifact = sample_artifact();
    artifact.pop();

    let mut source = MemorySource::new(artifact);
    let err = BundleReader::read(&mut source, &fixture_registry()).unwrap_err();

    assert!(err.is_truncated());
    assert_eq!(err.section(), Some(1));
}

#[test]
fn test_unknown_type_consumes_nothing_past_failing_descriptor() {
    let artifact = sample_artifact();
    let payload_len = artifact.len() - 8 - 2 * DESCRIPTOR_SIZE;

    // registry missing the first section's type
    let registry = Registry::new().register::<Waypoint>();
    let mut source = MemorySource::new(artifact);
    let err = BundleReader::read(&mut source, &registry).unwrap_err();

    match err {
        Error::UnknownType { section, tag } => {
            assert_eq!(section, 0);
            assert_eq!(tag, "Creature");
        }
        other => panic!("expected UnknownType, got {other}"),
    }
    assert_eq!(source.remaining() as usize, payload_len);
}

#[test]
fn test_schema_mismatch_on_conflicting_fixed_size() {
    // a second implementation claiming the same tag with a wider image
    #[derive(Debug, Clone, Copy)]
    struct WideWaypoint;

    impl FixedLayout for WideWaypoint {
        const TAG: &'static str = "Waypoint";
        const SIZE: usize = 16;
        fn store(&self, buf: &mut [u8]) {
            buf.fill(0);
        }
        fn load(_: &[u8]) -> Self {
            WideWaypoint
        }
    }

    let registry = Registry::new()
        .register::<Creature>()
        .register::<WideWaypoint>();
    let mut source = MemorySource::new(sample_artifact());
    let err = BundleReader::read(&mut source, &registry).unwrap_err();

    match err {
        Error::SchemaMismatch {
            section,
            stored,
            registered,
            ref tag,
        } => {
            assert_eq!(section, 1);
            assert_eq!(tag, "Waypoint");
            assert_eq!(stored, 12);
            assert_eq!(registered, 16);
        }
        other => panic!("expected SchemaMismatch, got {other}"),
    }
}

#[test]
fn test_three_byte_name_encodes_to_thirteen_bytes() {
    let creature = Creature {
        id: 7,
        health: 3,
        name: "abc".to_string(),
    };

    let mut sink = MemorySink::new();
    BundleWriter::new()
        .section(std::slice::from_ref(&creature))
        .unwrap()
        .write_to(&mut sink)
        .unwrap();
    let artifact = sink.into_bytes();

    // 1 + 1 + 8 + 3 payload bytes after the header and one descriptor
    assert_eq!(artifact.len(), 8 + DESCRIPTOR_SIZE + 13);

    // a round trip re-encodes to the identical bytes
    let mut source = MemorySource::new(artifact.clone());
    let mut bundle = BundleReader::read(&mut source, &fixture_registry()).unwrap();
    let decoded = bundle.take::<Creature>().unwrap();
    assert_eq!(decoded, vec![creature]);

    let mut sink = MemorySink::new();
    BundleWriter::new()
        .section(&decoded)
        .unwrap()
        .write_to(&mut sink)
        .unwrap();
    assert_eq!(sink.into_bytes(), artifact);
}

#[test]
fn test_long_tag_truncates_on_disk_and_still_decodes() {
    #[derive(Debug, Clone, Copy, PartialEq)]
    struct VerboselyNamedMarker {
        id: u32,
    }

    impl FixedLayout for VerboselyNamedMarker {
        const TAG: &'static str = "a_marker_type_with_an_overlong_name";
        const SIZE: usize = 4;
        fn store(&self, buf: &mut [u8]) {
            buf.copy_from_slice(&self.id.to_le_bytes());
        }
        fn load(buf: &[u8]) -> Self {
            VerboselyNamedMarker {
                id: u32::from_le_bytes(buf.try_into().unwrap()),
            }
        }
    }

    let markers = [VerboselyNamedMarker { id: 42 }];
    let mut sink = MemorySink::new();
    BundleWriter::new()
        .section(&markers)
        .unwrap()
        .write_to(&mut sink)
        .unwrap();
    let artifact = sink.into_bytes();

    // on-disk tag is the first 30 bytes followed by a null terminator
    let name_field = &artifact[16..16 + 32];
    let expected = &<VerboselyNamedMarker as FixedLayout>::TAG.as_bytes()[..TAG_MAX_LEN];
    assert_eq!(&name_field[..TAG_MAX_LEN], expected);
    assert_eq!(name_field[TAG_MAX_LEN], 0);

    // the registry keys by the same truncated form, so decoding succeeds
    let registry = Registry::new().register::<VerboselyNamedMarker>();
    let mut source = MemorySource::new(artifact);
    let mut bundle = BundleReader::read(&mut source, &registry).unwrap();
    assert_eq!(bundle.take::<VerboselyNamedMarker>().unwrap(), markers);
}

#[test]
fn test_file_backed_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("entities.bin");

    let written = BundleWriter::new()
        .section(&sample_creatures())
        .unwrap()
        .section(&sample_waypoints())
        .unwrap()
        .write_to_path(&path)
        .unwrap();
    assert_eq!(written, std::fs::metadata(&path).unwrap().len());

    let mut bundle = BundleReader::read_path(&path, &fixture_registry()).unwrap();
    assert_eq!(bundle.take::<Creature>().unwrap(), sample_creatures());
    assert_eq!(bundle.take::<Waypoint>().unwrap(), sample_waypoints());
}
