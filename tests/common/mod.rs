//! Shared fixture record types for integration tests.
//!
//! `Creature` exercises the custom-layout path (variable-length name);
//! `Waypoint` exercises the fixed-layout path (12-byte image).

// not every test binary uses every fixture
#![allow(dead_code)]

use entitybin::prelude::*;

/// Custom-layout record: two fixed-width scalars then a variable field.
///
/// Wire form: `id: u8`, `health: u8`, `name_len: u64`, `name` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Creature {
    pub id: u8,
    pub health: u8,
    pub name: String,
}

impl Record for Creature {
    const TAG: &'static str = "Creature";
    // fixed-width header: id + health + name length prefix
    const NOMINAL_SIZE: u32 = 10;
    const FIXED_LAYOUT: bool = false;

    fn encode_to(&self, out: &mut RecordWriter<'_>) -> entitybin::Result<u64> {
        let start = out.written();
        out.put_u8(self.id)?;
        out.put_u8(self.health)?;
        out.put_str(&self.name)?;
        Ok(out.written() - start)
    }

    fn decode_from(input: &mut RecordReader<'_>) -> entitybin::Result<Self> {
        let id = input.take_u8()?;
        let health = input.take_u8()?;
        let name = input.take_str()?;
        Ok(Creature { id, health, name })
    }
}

/// Fixed-layout record: `u32` plus a pair of `f32` coordinates, 12 bytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub id: u32,
    pub x: f32,
    pub y: f32,
}

impl FixedLayout for Waypoint {
    const TAG: &'static str = "Waypoint";
    const SIZE: usize = 12;

    fn store(&self, buf: &mut [u8]) {
        buf[0..4].copy_from_slice(&self.id.to_le_bytes());
        buf[4..8].copy_from_slice(&self.x.to_le_bytes());
        buf[8..12].copy_from_slice(&self.y.to_le_bytes());
    }

    fn load(buf: &[u8]) -> Self {
        Waypoint {
            id: u32::from_le_bytes(buf[0..4].try_into().unwrap()),
            x: f32::from_le_bytes(buf[4..8].try_into().unwrap()),
            y: f32::from_le_bytes(buf[8..12].try_into().unwrap()),
        }
    }
}

/// The sample data the original tool serializes.
pub fn sample_creatures() -> Vec<Creature> {
    vec![
        Creature {
            id: 1,
            health: 100,
            name: "long variable length name".to_string(),
        },
        Creature {
            id: 55,
            health: 19,
            name: "shorter varlen name".to_string(),
        },
    ]
}

pub fn sample_waypoints() -> Vec<Waypoint> {
    vec![
        Waypoint { id: 11, x: 100.0, y: 0.1 },
        Waypoint { id: 22, x: 1.0, y: 12345.6 },
        Waypoint { id: 33, x: 666.6, y: 666.6 },
    ]
}

/// Standard registry for the fixture types.
pub fn fixture_registry() -> Registry {
    Registry::new().register::<Creature>().register::<Waypoint>()
}

/// Write the sample bundle into memory and return the artifact bytes.
pub fn sample_artifact() -> Vec<u8> {
    let mut sink = MemorySink::new();
    BundleWriter::new()
        .section(&sample_creatures())
        .unwrap()
        .section(&sample_waypoints())
        .unwrap()
        .write_to(&mut sink)
        .unwrap();
    sink.into_bytes()
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}
