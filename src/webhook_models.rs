use serde::{Deserialize, Serialize};

use crate::formation::{classify, FormationTag};

/// Lead payload submitted by the form provider to `/webhook/jcdm`.
///
/// Everything is optional on the wire; the handler enforces email
/// presence. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct LeadPayload {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub zipcode: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub profile: Option<LeadProfile>,
    #[serde(default)]
    pub formation: Option<LeadFormation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeadProfile {
    #[serde(default)]
    pub professional_situation: Option<String>,
    #[serde(default)]
    pub education_level: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeadFormation {
    /// Free-text training-program name, classified case-insensitively.
    #[serde(default)]
    pub name: Option<String>,
}

impl LeadPayload {
    /// Dedup key. `None` when the field is absent or blank.
    pub fn email(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }
}

/// Contact record in Zoho's field schema.
///
/// At most one checkbox field is set, and only ever to `true`; absent
/// checkboxes are omitted from the JSON entirely, never sent as `false`.
#[derive(Debug, Clone, Serialize)]
pub struct ZohoContact {
    #[serde(rename = "First_Name", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "Last_Name", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Phone", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "Mailing_Zip", skip_serializing_if = "Option::is_none")]
    pub mailing_zip: Option<String>,
    #[serde(rename = "Mailing_City", skip_serializing_if = "Option::is_none")]
    pub mailing_city: Option<String>,
    #[serde(
        rename = "Projet_professionnel",
        skip_serializing_if = "Option::is_none"
    )]
    pub projet_professionnel: Option<String>,
    #[serde(rename = "Niveau_d_tudes", skip_serializing_if = "Option::is_none")]
    pub niveau_d_etudes: Option<String>,
    #[serde(rename = "COACHING", skip_serializing_if = "Option::is_none")]
    pub coaching: Option<bool>,
    #[serde(rename = "FORMATEUR", skip_serializing_if = "Option::is_none")]
    pub formateur: Option<bool>,
    #[serde(rename = "PRATICIEN_TB", skip_serializing_if = "Option::is_none")]
    pub praticien_tb: Option<bool>,
}

impl ZohoContact {
    /// Builds the Zoho record from the intake payload.
    ///
    /// `email` is the already-validated dedup key; the remaining fields
    /// are direct renames, plus the checkbox selected by the classifier.
    pub fn from_lead(lead: &LeadPayload, email: &str) -> Self {
        let tag = lead
            .formation
            .as_ref()
            .and_then(|f| f.name.as_deref())
            .and_then(classify);

        if let Some(tag) = tag {
            tracing::debug!("Formation classified as checkbox {}", tag.zoho_field());
        }

        Self {
            first_name: lead.firstname.clone(),
            last_name: lead.lastname.clone(),
            email: email.to_string(),
            phone: lead.phone.clone(),
            mailing_zip: lead.zipcode.clone(),
            mailing_city: lead.city.clone(),
            projet_professionnel: lead
                .profile
                .as_ref()
                .and_then(|p| p.professional_situation.clone()),
            niveau_d_etudes: lead
                .profile
                .as_ref()
                .and_then(|p| p.education_level.clone()),
            coaching: (tag == Some(FormationTag::Coaching)).then_some(true),
            formateur: (tag == Some(FormationTag::Formateur)).then_some(true),
            praticien_tb: (tag == Some(FormationTag::PraticienTb)).then_some(true),
        }
    }
}

/// Response body sent back to the form provider.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl WebhookResponse {
    pub fn created(contact_id: String) -> Self {
        Self {
            status: "success".to_string(),
            contact_id: Some(contact_id),
            message: None,
        }
    }

    pub fn duplicate() -> Self {
        Self {
            status: "duplicate".to_string(),
            contact_id: None,
            message: Some("Lead déjà présent".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_payload() {
        let json = r#"
        {
            "email": "lead@example.com",
            "firstname": "Jean",
            "lastname": "Dupont",
            "phone": "+33612345678",
            "zipcode": "75011",
            "city": "Paris",
            "profile": {
                "professional_situation": "Salarié",
                "education_level": "Bac+3"
            },
            "formation": {
                "name": "Coach Professionnel RNCP"
            }
        }
        "#;

        let payload: LeadPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.email(), Some("lead@example.com"));
        assert_eq!(payload.firstname.as_deref(), Some("Jean"));
        assert_eq!(
            payload.formation.unwrap().name.as_deref(),
            Some("Coach Professionnel RNCP")
        );
    }

    #[test]
    fn test_parse_minimal_payload() {
        let payload: LeadPayload = serde_json::from_str(r#"{"email":"a@b.fr"}"#).unwrap();
        assert_eq!(payload.email(), Some("a@b.fr"));
        assert!(payload.profile.is_none());
        assert!(payload.formation.is_none());
    }

    #[test]
    fn test_blank_email_counts_as_missing() {
        let payload: LeadPayload = serde_json::from_str(r#"{"email":"  "}"#).unwrap();
        assert_eq!(payload.email(), None);

        let payload: LeadPayload = serde_json::from_str("{}").unwrap();
        assert_eq!(payload.email(), None);
    }

    #[test]
    fn test_contact_uses_zoho_field_names() {
        let lead: LeadPayload = serde_json::from_str(
            r#"{
                "email": "lead@example.com",
                "firstname": "Jean",
                "zipcode": "75011",
                "profile": {"education_level": "Bac+3"},
                "formation": {"name": "psychopraticien"}
            }"#,
        )
        .unwrap();

        let contact = ZohoContact::from_lead(&lead, "lead@example.com");
        let value = serde_json::to_value(&contact).unwrap();

        assert_eq!(value["Email"], "lead@example.com");
        assert_eq!(value["First_Name"], "Jean");
        assert_eq!(value["Mailing_Zip"], "75011");
        assert_eq!(value["Niveau_d_tudes"], "Bac+3");
        assert_eq!(value["PRATICIEN_TB"], true);
        // Absent fields and unselected checkboxes are omitted, not null/false
        assert!(value.get("Last_Name").is_none());
        assert!(value.get("COACHING").is_none());
        assert!(value.get("FORMATEUR").is_none());
    }

    #[test]
    fn test_unknown_formation_sets_no_checkbox() {
        let lead: LeadPayload = serde_json::from_str(
            r#"{"email": "x@y.fr", "formation": {"name": "formation inconnue"}}"#,
        )
        .unwrap();

        let contact = ZohoContact::from_lead(&lead, "x@y.fr");
        let value = serde_json::to_value(&contact).unwrap();

        assert!(value.get("COACHING").is_none());
        assert!(value.get("FORMATEUR").is_none());
        assert!(value.get("PRATICIEN_TB").is_none());
    }

    #[test]
    fn test_at_most_one_checkbox_selected() {
        let lead: LeadPayload = serde_json::from_str(
            r#"{"email": "x@y.fr", "formation": {"name": "Fondamentaux du Coaching"}}"#,
        )
        .unwrap();

        let contact = ZohoContact::from_lead(&lead, "x@y.fr");
        let set = [contact.coaching, contact.formateur, contact.praticien_tb]
            .iter()
            .filter(|flag| flag.is_some())
            .count();
        assert_eq!(set, 1);
        assert_eq!(contact.coaching, Some(true));
    }

    #[test]
    fn test_response_shapes() {
        let success = serde_json::to_value(WebhookResponse::created("99887".to_string())).unwrap();
        assert_eq!(success["status"], "success");
        assert_eq!(success["contact_id"], "99887");
        assert!(success.get("message").is_none());

        let duplicate = serde_json::to_value(WebhookResponse::duplicate()).unwrap();
        assert_eq!(duplicate["status"], "duplicate");
        assert_eq!(duplicate["message"], "Lead déjà présent");
        assert!(duplicate.get("contact_id").is_none());
    }
}
