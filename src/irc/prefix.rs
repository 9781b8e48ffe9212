use std::cmp::PartialEq;

// the ":<prefix>" sender of a line, either a server or nick[!user]@host
#[derive(Debug, Default)]
pub struct Prefix {
    pub nick: Option<String>,
    pub user: Option<String>,
    pub host: Option<String>,
}

impl PartialEq for Prefix {
    fn eq(&self, other: &Self) -> bool {
        self.nick.as_deref() == other.nick.as_deref()
            && self.user.as_deref() == other.user.as_deref()
            && self.host.as_deref() == other.host.as_deref()
    }
}

/* we don't validate anything here, the server is trusted to send sane
 * prefixes; a bare name with a dot in it is taken to be a server */
pub fn parse_prefix(s: &str) -> Prefix {
    if let Some((nick, host)) = s.split_once('@') {
        if let Some((nick, user)) = nick.split_once('!') {
            Prefix {
                nick: Some(nick.to_string()),
                user: Some(user.to_string()),
                host: Some(host.to_string()),
            }
        } else {
            Prefix {
                nick: Some(nick.to_string()),
                user: None,
                host: Some(host.to_string()),
            }
        }
    } else if s.contains('.') {
        Prefix {
            nick: None,
            user: None,
            host: Some(s.to_string()),
        }
    } else {
        Prefix {
            nick: Some(s.to_string()),
            user: None,
            host: None,
        }
    }
}

impl Prefix {
    // what to show as the author of a message
    pub fn name(&self) -> &str {
        self.nick
            .as_deref()
            .or_else(|| self.host.as_deref())
            .unwrap_or("")
    }
}
