// this module contains protocol definitions and the session state model
// that parsed lines are applied to; the presentation layer reads it,
// the engine (client.rs) is the only thing that writes to it apart from
// picking the current view
pub mod chan;
pub mod command;
pub mod err_defs;
pub mod error;
pub mod message;
pub mod prefix;
pub mod reply;
pub mod rpl_defs;

use crate::irc::chan::Channel;
use crate::irc::command::Command;
use crate::irc::error::Error;
use crate::irc::message::Message;
use crate::irc::prefix::parse_prefix;
use crate::irc::reply::Reply;
use log::debug;

pub const JOINED_TEXT: &str = "joined";

// which log is being looked at: the server/system log, or a channel
// by its index in discovery order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    System,
    Channel(usize),
}

impl Default for View {
    fn default() -> Self {
        View::System
    }
}

#[derive(Debug)]
pub struct Session {
    nick: String,
    channels: Vec<Channel>,
    system_messages: Vec<Message>,
    current: View,
}

impl Session {
    pub fn new(nick: &str) -> Session {
        Session {
            nick: nick.to_string(),
            channels: Vec::new(),
            system_messages: Vec::new(),
            current: View::System,
        }
    }

    pub fn nick(&self) -> &str {
        &self.nick
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn system_messages(&self) -> &[Message] {
        &self.system_messages
    }

    pub fn current_view(&self) -> View {
        self.current
    }

    // only valid views are taken, returns false (and changes nothing)
    // for a channel index we don't have
    pub fn select(&mut self, view: View) -> bool {
        if let View::Channel(i) = view {
            if i >= self.channels.len() {
                return false;
            }
        }
        self.current = view;
        true
    }

    pub fn current_channel(&self) -> Option<&Channel> {
        match self.current {
            View::System => None,
            View::Channel(i) => self.channels.get(i),
        }
    }

    pub fn current_messages(&self) -> &[Message] {
        match self.current_channel() {
            Some(chan) => chan.messages(),
            None => &self.system_messages,
        }
    }

    // first exact match wins, nothing stops RPL_LIST handing us duplicates
    pub fn channel_index(&self, name: &str) -> Option<usize> {
        self.channels.iter().position(|chan| chan.get_name() == name)
    }

    pub fn find_channel(&self, name: &str) -> Option<&Channel> {
        self.channel_index(name).map(|i| &self.channels[i])
    }

    fn find_channel_mut(&mut self, name: &str) -> Result<&mut Channel, Error> {
        match self.channel_index(name) {
            Some(i) => Ok(&mut self.channels[i]),
            None => Err(Error::NoSuchChannel(name.to_string())),
        }
    }

    // server text goes to whatever log is currently on screen
    fn push_to_current(&mut self, msg: Message) {
        match self.current {
            View::Channel(i) if i < self.channels.len() => self.channels[i].push_message(msg),
            _ => self.system_messages.push(msg),
        }
    }

    fn is_own_prefix(&self, sender: &str) -> bool {
        match parse_prefix(sender).nick {
            Some(nick) => nick.eq_ignore_ascii_case(&self.nick),
            None => false,
        }
    }

    pub fn apply_reply(&mut self, sender: &str, reply: Reply) -> Result<(), Error> {
        match reply {
            Reply::Status { text, .. } => self.push_to_current(Message::new(sender, &text)),
            Reply::ChannelCount { count, text } => {
                debug!("{} reports {} channels formed", sender, count);
                self.push_to_current(Message::new(sender, &text));
            }
            Reply::List { channel } => self.channels.push(Channel::new(&channel)),
            Reply::Topic { channel, topic } => self.find_channel_mut(&channel)?.set_topic(&topic),
            Reply::Ignored(code) => debug!("nothing to do for {:03}", code),
        }
        Ok(())
    }

    pub fn apply_command(&mut self, sender: &str, command: Command) -> Result<(), Error> {
        match command {
            Command::Join(name) => {
                let own = self.is_own_prefix(sender);
                let chan = self.find_channel_mut(&name)?;
                if own {
                    chan.set_joined();
                }
                chan.push_message(Message::new(sender, JOINED_TEXT));
            }
            Command::Privmsg { target, text } => {
                self.find_channel_mut(&target)?.push_message(Message::new(sender, &text));
            }
        }
        Ok(())
    }

    // local echo of something we said, returns the channel it went to
    pub fn record_own_message(&mut self, text: &str) -> Result<String, Error> {
        let nick = self.nick.clone();
        let i = match self.current {
            View::Channel(i) if i < self.channels.len() => i,
            _ => return Err(Error::NoChannelSelected),
        };
        let chan = &mut self.channels[i];
        chan.push_message(Message::new(&nick, text));
        Ok(chan.get_name().to_string())
    }
}
