//! PTR query construction.
//!
//! Queries are built with `hickory-proto` and serialized to wire format.
//! When an EDNS payload size is configured an OPT pseudo-record is appended
//! to the additional section so resolvers can answer large PTR sets over UDP.

use ip6walk_domain::DomainError;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;

const OPT_RECORD_TYPE: u16 = 41;
const ARCOUNT_OFFSET: usize = 10;

pub struct MessageBuilder;

impl MessageBuilder {
    /// Recursive PTR query for `name` with a random ID.
    pub fn build_ptr_query(name: &str, edns_payload: Option<u16>) -> Result<Vec<u8>, DomainError> {
        Self::build_ptr_query_with_id(fastrand::u16(..), name, edns_payload)
    }

    pub fn build_ptr_query_with_id(
        id: u16,
        name: &str,
        edns_payload: Option<u16>,
    ) -> Result<Vec<u8>, DomainError> {
        let name = Name::from_str(name).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", name, e))
        })?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(RecordType::PTR);
        query.set_query_class(DNSClass::IN);

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(query);

        let mut buf = Self::serialize_message(&message)?;
        if let Some(payload) = edns_payload {
            append_opt_record(&mut buf, payload)?;
        }
        Ok(buf)
    }

    fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(128);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidDomainName(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }
}

/// OPT RR (RFC 6891 §6.1.2): root owner, TYPE 41, CLASS carries the UDP
/// payload size, TTL carries extended rcode/version/flags (all zero), no
/// options.
fn append_opt_record(buf: &mut Vec<u8>, payload: u16) -> Result<(), DomainError> {
    let arcount = buf
        .get(ARCOUNT_OFFSET..ARCOUNT_OFFSET + 2)
        .map(|b| u16::from_be_bytes([b[0], b[1]]))
        .ok_or_else(|| DomainError::InvalidDomainName("Query header too short".to_string()))?;
    let arcount = (arcount + 1).to_be_bytes();
    buf[ARCOUNT_OFFSET] = arcount[0];
    buf[ARCOUNT_OFFSET + 1] = arcount[1];

    buf.push(0);
    buf.extend_from_slice(&OPT_RECORD_TYPE.to_be_bytes());
    buf.extend_from_slice(&payload.to_be_bytes());
    buf.extend_from_slice(&[0, 0, 0, 0]);
    buf.extend_from_slice(&[0, 0]);
    Ok(())
}
