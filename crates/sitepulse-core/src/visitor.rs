//! Visitor identity helpers.
//!
//! A visitor ID is an opaque random UUID, generated once per browser profile
//! and persisted client-side (localStorage or equivalent). It is only a
//! grouping key for unique-visitor counts — never an auth concept, and not
//! stable across devices. Existing IDs are reused as-is; the server never
//! recalculates or validates them beyond non-emptiness.

/// Generate a fresh visitor identifier.
pub fn new_visitor_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Client-held tracking identity, passed explicitly to the recorders.
///
/// The opt-out flag is checked by the *caller* before any tracking call is
/// made — the ingestion endpoints themselves accept whatever identity they
/// are given. Persistence of both fields is delegated to the embedding
/// client's durable storage.
#[derive(Debug, Clone)]
pub struct VisitorContext {
    pub visitor_id: String,
    pub opted_out: bool,
}

impl VisitorContext {
    pub fn new(visitor_id: impl Into<String>) -> Self {
        Self {
            visitor_id: visitor_id.into(),
            opted_out: false,
        }
    }

    /// Whether the caller should invoke the Event Recorders at all.
    pub fn should_track(&self) -> bool {
        !self.opted_out && !self.visitor_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visitor_id_is_a_uuid() {
        let id = new_visitor_id();
        assert!(uuid::Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn fresh_ids_are_distinct() {
        assert_ne!(new_visitor_id(), new_visitor_id());
    }

    #[test]
    fn opted_out_visitor_is_not_tracked() {
        let mut ctx = VisitorContext::new(new_visitor_id());
        assert!(ctx.should_track());
        ctx.opted_out = true;
        assert!(!ctx.should_track());
    }

    #[test]
    fn empty_identity_is_not_tracked() {
        assert!(!VisitorContext::new("").should_track());
    }
}
