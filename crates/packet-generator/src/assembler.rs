//! Packet assembly from a timestamp, a source id and data point values.

use crate::generators::synthesize;
use crate::packet::{
    EnvelopePacket, Extension, FlatPacket, Readings, SiiSlots, ACCOUNT_ID, DEVICE_MODEL,
    DEVICE_TYPE, ENTITY_ID, ENVELOPE_VERSION, EVENT_CODE, EVENT_TYPE, EXTENSION_VERSION,
    SERVICE_ID,
};
use crate::timestamp::format_timestamp;
use chrono::NaiveDateTime;
use rand::Rng;
use telemetry_core::{DataPoint, SampleValue};

/// Synthesize one value per data point, keyed by its packet key.
///
/// Values are inserted into `readings` in data point order; a key that is
/// already present keeps its position and takes the new value.
pub fn fill_readings<R: Rng>(readings: &mut Readings, points: &[&DataPoint], rng: &mut R) {
    for dp in points {
        readings.insert(dp.packet_key(), synthesize(dp, rng));
    }
}

/// Build an envelope packet for one tick.
pub fn assemble_envelope<R: Rng>(
    source_id: &str,
    at: NaiveDateTime,
    seqid: u64,
    points: &[&DataPoint],
    rng: &mut R,
) -> EnvelopePacket {
    let tms = format_timestamp(at);

    let mut readings = Readings::new();
    readings.insert("tmsp".to_string(), SampleValue::Text(tms.clone()));
    readings.insert("evc".to_string(), SampleValue::Int(EVENT_CODE));
    readings.insert("tms".to_string(), SampleValue::Text(tms.clone()));
    fill_readings(&mut readings, points, rng);

    EnvelopePacket {
        ver: ENVELOPE_VERSION.to_string(),
        pld: source_id.to_string(),
        svc: SERVICE_ID.to_string(),
        aid: ACCOUNT_ID.to_string(),
        eid: ENTITY_ID.to_string(),
        dvt: DEVICE_TYPE.to_string(),
        dvm: DEVICE_MODEL.to_string(),
        evt: EVENT_TYPE.to_string(),
        tms,
        evc: EVENT_CODE.to_string(),
        seqid,
        alt: None,
        ext: vec![Extension {
            ver: EXTENSION_VERSION.to_string(),
            sii: SiiSlots { primary: readings },
        }],
    }
}

/// Build a flat packet for one (asset type, source id, tick).
pub fn assemble_flat<R: Rng>(
    asset_type: &str,
    source_id: &str,
    at: NaiveDateTime,
    points: &[&DataPoint],
    rng: &mut R,
) -> FlatPacket {
    let mut parameters = Readings::new();
    fill_readings(&mut parameters, points, rng);

    FlatPacket {
        pld: source_id.to_string(),
        asset_type: asset_type.to_string(),
        timestamp: format_timestamp(at),
        parameters,
    }
}
