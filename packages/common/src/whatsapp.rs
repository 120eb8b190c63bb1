/// Site setting holding the phone number join requests are sent to.
pub const WHATSAPP_PHONE_KEY: &str = "whatsapp_phone";

/// Pre-filled message of the join-request deep link.
pub const JOIN_MESSAGE: &str = "¡Hola! Me gustaría formar parte del club de corredores.";

/// Build a `wa.me` deep link to `phone` with `message` pre-filled.
///
/// Everything but digits is stripped from the phone number, so stored values
/// like `+52 (81) 1234-5678` work. Returns `None` when no digits remain.
pub fn join_link(phone: &str, message: &str) -> Option<String> {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    Some(format!(
        "https://wa.me/{digits}?text={}",
        urlencoding::encode(message)
    ))
}
