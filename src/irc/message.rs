extern crate chrono;
use crate::irc::prefix::parse_prefix;
use chrono::{DateTime, Utc};

// one entry in a message log, owned by that log alone
#[derive(Debug, Clone)]
pub struct Message {
    pub sender: String,
    pub text: String,
    pub received: DateTime<Utc>,
}

impl Message {
    pub fn new(sender: &str, text: &str) -> Message {
        Message {
            sender: sender.to_string(),
            text: text.to_string(),
            received: Utc::now(),
        }
    }

    // the sender is the raw prefix, this strips it down to the nick
    // (or the server name for server notices)
    pub fn nick(&self) -> String {
        parse_prefix(&self.sender).name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nick_test() {
        let msg = Message::new("aoei!~ykstort@localhost", "hi");
        assert_eq!(msg.nick(), "aoei");
        assert_eq!(msg.sender, "aoei!~ykstort@localhost", "sender keeps the full prefix");
    }

    #[test]
    fn received_is_stamped_test() {
        let before = Utc::now();
        let msg = Message::new("irc.example.net", "Welcome");
        assert!(msg.received >= before);
        assert!(msg.received <= Utc::now());
    }
}
