//! Classification of free-text formation names into Zoho checkbox tags.

/// Categorical tag derived from a training-program name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormationTag {
    Coaching,
    Formateur,
    PraticienTb,
}

impl FormationTag {
    /// API name of the Zoho checkbox field carrying this tag.
    pub fn zoho_field(&self) -> &'static str {
        match self {
            FormationTag::Coaching => "COACHING",
            FormationTag::Formateur => "FORMATEUR",
            FormationTag::PraticienTb => "PRATICIEN_TB",
        }
    }
}

/// Maps a formation name to its checkbox tag.
///
/// Matching is case-insensitive on the whole string and ignores
/// surrounding or repeated whitespace. Unknown names yield `None`
/// rather than an error. Pure function, no state.
pub fn classify(name: &str) -> Option<FormationTag> {
    let normalized = name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    match normalized.as_str() {
        "coach professionnel rncp" => Some(FormationTag::Coaching),
        "formateur professionnel rncp" => Some(FormationTag::Formateur),
        "fondamentaux du coaching" => Some(FormationTag::Coaching),
        "hypnothérapeute" => Some(FormationTag::PraticienTb),
        "psychopraticien" => Some(FormationTag::PraticienTb),
        "les fondamentaux de la relation d'aide" => Some(FormationTag::PraticienTb),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names_map_to_tags() {
        assert_eq!(
            classify("coach professionnel rncp"),
            Some(FormationTag::Coaching)
        );
        assert_eq!(
            classify("formateur professionnel rncp"),
            Some(FormationTag::Formateur)
        );
        assert_eq!(
            classify("fondamentaux du coaching"),
            Some(FormationTag::Coaching)
        );
        assert_eq!(classify("hypnothérapeute"), Some(FormationTag::PraticienTb));
        assert_eq!(classify("psychopraticien"), Some(FormationTag::PraticienTb));
        assert_eq!(
            classify("les fondamentaux de la relation d'aide"),
            Some(FormationTag::PraticienTb)
        );
    }

    #[test]
    fn test_case_insensitive_on_full_string() {
        assert_eq!(
            classify("Coach Professionnel RNCP"),
            Some(FormationTag::Coaching)
        );
        assert_eq!(
            classify("COACH PROFESSIONNEL RNCP"),
            Some(FormationTag::Coaching)
        );
        assert_eq!(classify("HYPNOTHÉRAPEUTE"), Some(FormationTag::PraticienTb));
    }

    #[test]
    fn test_whitespace_insensitive() {
        assert_eq!(
            classify("  coach   professionnel  rncp "),
            Some(FormationTag::Coaching)
        );
        assert_eq!(classify("\tpsychopraticien\n"), Some(FormationTag::PraticienTb));
    }

    #[test]
    fn test_unknown_or_empty_yields_no_tag() {
        assert_eq!(classify(""), None);
        assert_eq!(classify("   "), None);
        assert_eq!(classify("coach"), None);
        assert_eq!(classify("formation inconnue"), None);
        // Partial-word matches must not classify
        assert_eq!(classify("coach professionnel"), None);
    }

    #[test]
    fn test_zoho_field_names() {
        assert_eq!(FormationTag::Coaching.zoho_field(), "COACHING");
        assert_eq!(FormationTag::Formateur.zoho_field(), "FORMATEUR");
        assert_eq!(FormationTag::PraticienTb.zoho_field(), "PRATICIEN_TB");
    }

    #[test]
    fn test_classification_is_idempotent() {
        let first = classify("Coach Professionnel RNCP");
        let second = classify("Coach Professionnel RNCP");
        assert_eq!(first, second);
    }
}
