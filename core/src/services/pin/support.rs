//! Support contact link for locked-out beneficiaries

use bp_shared::config::SupportContactConfig;

/// Composes WhatsApp links to the support line
#[derive(Debug, Clone)]
pub struct SupportContact {
    number: String,
    message_template: String,
}

impl SupportContact {
    pub fn new(number: impl Into<String>, message_template: impl Into<String>) -> Self {
        Self {
            number: number.into().chars().filter(|c| c.is_ascii_digit()).collect(),
            message_template: message_template.into(),
        }
    }

    /// Link that opens a chat prefilled with the subject's identifier
    pub fn link(&self, subject_id: &str) -> String {
        let text = self.message_template.replace("{id}", subject_id.trim());
        format!(
            "https://wa.me/{}?text={}",
            self.number,
            urlencoding::encode(&text)
        )
    }
}

impl From<&SupportContactConfig> for SupportContact {
    fn from(config: &SupportContactConfig) -> Self {
        Self::new(&config.whatsapp_number, &config.message_template)
    }
}
