use crate::domain::Contact;
use url::Url;

pub const SEND_ENDPOINT: &str = "https://web.whatsapp.com/send";

/// WhatsApp Web link that opens a chat with `contact` and `message` prefilled.
///
/// Numbers already marked international keep their own country code; the
/// rest are prefixed with `default_country_code`.
pub fn send_link(contact: &Contact, message: &str, default_country_code: &str) -> String {
    let phone = if contact.number.is_international() {
        contact.number.digits().to_string()
    } else {
        format!("{}{}", default_country_code.trim_start_matches('+'), contact.number.digits())
    };

    match Url::parse_with_params(SEND_ENDPOINT, &[("phone", phone.as_str()), ("text", message)]) {
        Ok(url) => url.into(),
        Err(_) => format!("{SEND_ENDPOINT}?phone={phone}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CanonicalPhone;

    fn contact(number: &str) -> Contact {
        Contact::new(CanonicalPhone::new(number).unwrap(), "Ada").unwrap()
    }

    #[test]
    fn send_link_prefixes_local_numbers() {
        let link = send_link(&contact("98765 43210"), "hi", "91");
        assert_eq!(
            link,
            "https://web.whatsapp.com/send?phone=919876543210&text=hi"
        );
    }

    #[test]
    fn send_link_keeps_international_numbers() {
        let link = send_link(&contact("+1 555 123 4567"), "hi", "91");
        assert!(link.contains("phone=15551234567"));
    }

    #[test]
    fn send_link_encodes_message() {
        let link = send_link(&contact("5551234567"), "see you at 5 & bring snacks", "1");
        assert!(link.ends_with("text=see+you+at+5+%26+bring+snacks"));
    }
}
