//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod envelope;
mod query;

pub use envelope::{
    TransportError, decode_error_message, decode_json_response, decode_list_envelope,
};
pub use query::append_query;
