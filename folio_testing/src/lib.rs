//! Stand-ins for the external services used by the folio backend.

pub mod telegram;
