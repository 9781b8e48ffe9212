extern crate log;
use crate::irc::message::Message;
use log::debug;

#[derive(Debug)]
pub struct Channel {
    name: String,
    topic: String,
    messages: Vec<Message>,
    joined: bool,
}

impl Channel {
    pub fn new(chanmask: &str) -> Channel {
        debug!("discovered channel {}", chanmask);
        Channel {
            name: chanmask.to_string(),
            topic: String::new(),
            messages: Vec::new(),
            joined: false,
        }
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_topic(&self) -> &str {
        &self.topic
    }

    pub fn set_topic(&mut self, topic: &str) {
        self.topic = topic.to_string();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    // append-only, in arrival order
    pub fn push_message(&mut self, msg: Message) {
        self.messages.push(msg);
    }

    pub fn is_joined(&self) -> bool {
        self.joined
    }

    pub fn set_joined(&mut self) {
        self.joined = true;
    }
}
