use ip6walk_domain::{DomainError, PtrLookup};
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RData;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ParsedResponse {
    pub rcode: ResponseCode,

    pub truncated: bool,

    pub ptr_names: Vec<String>,
}

impl ParsedResponse {
    pub fn is_nxdomain(&self) -> bool {
        self.rcode == ResponseCode::NXDomain
    }

    /// NXDOMAIN, NOERROR with PTR data, or NOERROR without. Any other
    /// rcode is an upstream failure.
    pub fn into_lookup(self, server: &str) -> Result<PtrLookup, DomainError> {
        match self.rcode {
            ResponseCode::NXDomain => Ok(PtrLookup::NxDomain),
            ResponseCode::NoError if self.ptr_names.is_empty() => Ok(PtrLookup::NoData),
            ResponseCode::NoError => Ok(PtrLookup::Answer(self.ptr_names)),
            rcode => Err(DomainError::UpstreamRcode {
                server: server.to_string(),
                rcode: ResponseParser::rcode_to_status(rcode).to_string(),
            }),
        }
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<ParsedResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let rcode = message.response_code();
        let truncated = message.truncated();

        let mut ptr_names = Vec::new();
        for record in message.answers() {
            if let RData::PTR(ptr) = record.data() {
                ptr_names.push(ptr.to_utf8());
            }
        }

        debug!(
            rcode = ?rcode,
            answers = ptr_names.len(),
            truncated = truncated,
            "DNS response parsed"
        );

        Ok(ParsedResponse {
            rcode,
            truncated,
            ptr_names,
        })
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
