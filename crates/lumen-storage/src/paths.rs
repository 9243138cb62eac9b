//! Storage path conventions.
//!
//! Proof uploads are keyed by registration id so resubmission
//! overwrites the previous file instead of orphaning it.

use uuid::Uuid;

/// Path for a registration's payment-proof image.
pub fn proof_path(registration_id: Uuid, extension: &str) -> String {
    format!("proofs/{registration_id}.{extension}")
}

/// Path for an event's default payment QR code.
pub fn event_qr_path(event_id: Uuid, extension: &str) -> String {
    format!("qr/events/{event_id}.{extension}")
}

/// Path for a registration-specific QR override.
pub fn registration_qr_path(registration_id: Uuid, extension: &str) -> String {
    format!("qr/registrations/{registration_id}.{extension}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proof_path_is_keyed_by_registration() {
        let id = Uuid::new_v4();
        assert_eq!(proof_path(id, "png"), format!("proofs/{id}.png"));
        // Resubmission targets the same path.
        assert_eq!(proof_path(id, "png"), proof_path(id, "png"));
    }
}
