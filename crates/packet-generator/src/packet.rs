//! Packet shapes and their serialized form.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use telemetry_core::SampleValue;

/// Data point key → synthesized value, in data point order.
pub type Readings = IndexMap<String, SampleValue>;

/// Envelope protocol version.
pub const ENVELOPE_VERSION: &str = "1.0";
/// Extension block version.
pub const EXTENSION_VERSION: &str = "3.0";
pub const SERVICE_ID: &str = "svc33338597";
pub const ACCOUNT_ID: &str = "A173378384";
pub const ENTITY_ID: &str = "2109801";
pub const DEVICE_TYPE: &str = "jvt1443";
pub const DEVICE_MODEL: &str = "JVT1443";
pub const EVENT_TYPE: &str = "EV";
/// Event code, a string in the envelope and a number inside `sii`.
pub const EVENT_CODE: i64 = 300;

/// Output file name for multi-source runs.
pub const MULTI_SOURCE_FILE_NAME: &str = "multi_asset_data.json";

/// Output file name for a single-source run.
///
/// Path separators in either part are replaced so the name stays a single
/// component of the output directory.
pub fn single_source_file_name(source_id: &str, asset_type: &str) -> String {
    format!(
        "{}_{}_data.json",
        file_name_part(source_id),
        file_name_part(asset_type)
    )
}

fn file_name_part(text: &str) -> String {
    text.replace(['/', '\\'], "_")
}

/// Single-source packet with protocol metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopePacket {
    pub ver: String,
    pub pld: String,
    pub svc: String,
    pub aid: String,
    pub eid: String,
    pub dvt: String,
    pub dvm: String,
    pub evt: String,
    pub tms: String,
    pub evc: String,
    pub seqid: u64,
    pub alt: Option<String>,
    pub ext: Vec<Extension>,
}

/// One `ext` entry of an envelope packet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extension {
    pub ver: String,
    pub sii: SiiSlots,
}

/// The `sii` object; only slot `"1"` is ever populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiiSlots {
    #[serde(rename = "1")]
    pub primary: Readings,
}

impl EnvelopePacket {
    /// The readings map inside `ext[0].sii["1"]`.
    pub fn readings(&self) -> Option<&Readings> {
        self.ext.first().map(|ext| &ext.sii.primary)
    }
}

/// Multi-source packet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatPacket {
    pub pld: String,
    pub asset_type: String,
    pub timestamp: String,
    pub parameters: Readings,
}

/// Serialize packets as a JSON array indented with 4 spaces.
pub fn to_pretty_json<P: Serialize>(packets: &[P]) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    packets.serialize(&mut ser)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        assert_eq!(
            single_source_file_name("PLD-001", "HVAC"),
            "PLD-001_HVAC_data.json"
        );
        assert_eq!(MULTI_SOURCE_FILE_NAME, "multi_asset_data.json");
    }

    #[test]
    fn test_file_name_strips_path_separators() {
        assert_eq!(
            single_source_file_name("../x", "HVAC"),
            ".._x_HVAC_data.json"
        );
        assert_eq!(
            single_source_file_name("a/b", "Sub\\Meter"),
            "a_b_Sub_Meter_data.json"
        );
    }

    #[test]
    fn test_flat_packet_field_order() {
        let mut parameters = Readings::new();
        parameters.insert("zeta".to_string(), SampleValue::Int(1));
        parameters.insert("alpha".to_string(), SampleValue::Bool(false));
        let packet = FlatPacket {
            pld: "PLD-1".to_string(),
            asset_type: "DG".to_string(),
            timestamp: "2024-01-01T00:00:00+0530".to_string(),
            parameters,
        };

        let json = serde_json::to_string(&packet).unwrap();
        assert_eq!(
            json,
            r#"{"pld":"PLD-1","asset_type":"DG","timestamp":"2024-01-01T00:00:00+0530","parameters":{"zeta":1,"alpha":false}}"#
        );
    }

    #[test]
    fn test_pretty_json_uses_four_spaces() {
        let bytes = to_pretty_json(&[1, 2]).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "[\n    1,\n    2\n]");
    }
}
