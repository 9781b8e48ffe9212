mod common;

use common::{setup, system_texts, texts};
use rusty_ircc::irc::error::Error as IrcError;
use rusty_ircc::parser::ParseError;
use rusty_ircc::{ClientError, View};

const GREETING: &str = "\
:irc.example.net 001 aoei :Welcome to the ExampleNet IRC Network aoei\r\n\
:irc.example.net 002 aoei :Your host is irc.example.net, running version 1.0\r\n\
:irc.example.net 003 aoei :This server was created today\r\n\
:irc.example.net 004 aoei irc.example.net 1.0 iosw biklmnopstv bklov\r\n\
:irc.example.net 005 aoei CHANTYPES=# NETWORK=ExampleNet :are supported by this server\r\n\
:irc.example.net 251 aoei :There are 1 users and 0 invisible on 1 servers\r\n\
:irc.example.net 254 aoei 2 :channels formed\r\n\
:irc.example.net 255 aoei :I have 1 clients and 0 servers\r\n\
:irc.example.net 265 aoei 1 1 :Current local users 1, max 1\r\n\
:irc.example.net 266 aoei 1 1 :Current global users 1, max 1\r\n\
:irc.example.net 250 aoei :Highest connection count: 1 (1 clients)\r\n\
:irc.example.net 422 aoei :MOTD File is missing\r\n\
:irc.example.net 321 aoei Channel :Users  Name\r\n\
:irc.example.net 322 aoei #general 1 :\r\n\
:irc.example.net 322 aoei #rust 3 :[+nt] crabs\r\n\
:irc.example.net 323 aoei :End of /LIST\r\n";

#[test]
fn register_test() {
    let (mut client, remote, _) = setup();
    client.register("aoei").unwrap();
    assert_eq!(remote.take_sent(), "NICK aoei\r\nUSER aoei * * :aoei\r\nLIST\r\n");
}

#[test]
fn greeting_test() {
    let (mut client, remote, mut session) = setup();
    remote.push(GREETING.as_bytes());
    assert_eq!(client.process_pending_input(&mut session).unwrap(), 16);
    assert_eq!(
        system_texts(&session),
        vec![
            "Welcome to the ExampleNet IRC Network aoei",
            "Your host is irc.example.net, running version 1.0",
            "This server was created today",
            "There are 1 users and 0 invisible on 1 servers",
            "channels formed",
            "I have 1 clients and 0 servers",
        ]
    );
    let names: Vec<&str> = session.channels().iter().map(|c| c.get_name()).collect();
    assert_eq!(names, vec!["#general", "#rust"]);
    assert_eq!(client.pending_input(), 0);
    assert_eq!(remote.take_sent(), "", "nothing in the greeting needs an answer");
}

#[test]
fn list_creates_empty_channel_test() {
    let (mut client, remote, mut session) = setup();
    remote.push(b":irc.example.net 322 aoei #general 5 :a topic we don't keep\r\n");
    assert_eq!(client.process_pending_input(&mut session).unwrap(), 1);
    assert_eq!(session.channels().len(), 1);
    let chan = &session.channels()[0];
    assert_eq!(chan.get_name(), "#general");
    assert_eq!(chan.get_topic(), "");
    assert!(chan.messages().is_empty());
    assert!(session.system_messages().is_empty());
}

#[test]
fn join_flow_test() {
    let (mut client, remote, mut session) = setup();
    remote.push(GREETING.as_bytes());
    client.process_pending_input(&mut session).unwrap();
    let before = session.system_messages().len();

    remote.push(
        b":aoei!~aoei@localhost JOIN :#rust\r\n\
          :irc.example.net 332 aoei #rust :crabs all the way down\r\n\
          :irc.example.net 333 aoei #rust ferris 1600000000\r\n\
          :irc.example.net 353 aoei = #rust :@ferris aoei\r\n\
          :irc.example.net 366 aoei #rust :End of /NAMES list.\r\n",
    );
    assert_eq!(client.process_pending_input(&mut session).unwrap(), 5);
    let rust = session.find_channel("#rust").unwrap();
    assert!(rust.is_joined());
    assert_eq!(rust.get_topic(), "crabs all the way down");
    assert_eq!(texts(&session, "#rust"), vec!["joined"]);
    assert!(session.find_channel("#general").unwrap().messages().is_empty());
    assert_eq!(session.system_messages().len(), before, "a JOIN doesn't touch the system log");
}

#[test]
fn privmsg_test() {
    let (mut client, remote, mut session) = setup();
    remote.push(b":irc.example.net 322 aoei #general 2 :\r\n");
    remote.push(b":ferris!~f@crab.example PRIVMSG #general :hello : world\r\n");
    assert_eq!(client.process_pending_input(&mut session).unwrap(), 2);
    let chan = session.find_channel("#general").unwrap();
    assert_eq!(chan.messages().len(), 1);
    assert_eq!(chan.messages()[0].sender, "ferris!~f@crab.example");
    assert_eq!(chan.messages()[0].nick(), "ferris");
    assert_eq!(chan.messages()[0].text, "hello : world");
}

#[test]
fn privmsg_unknown_channel_test() {
    let (mut client, remote, mut session) = setup();
    remote.push(b":ferris!~f@crab.example PRIVMSG #nowhere :hello\r\n:irc.example.net 322 aoei #general 2 :\r\n");
    match client.process_pending_input(&mut session) {
        Err(ClientError::Irc(err)) => assert_eq!(err, IrcError::NoSuchChannel("#nowhere".to_string())),
        other => panic!("expected NoSuchChannel, got {:?}", other),
    }
    assert!(session.channels().is_empty());
    assert!(client.is_connected(), "not a fatal error");

    // the line parsed fine, so the next call carries straight on
    assert_eq!(client.process_pending_input(&mut session).unwrap(), 1);
    assert_eq!(session.channels().len(), 1);
}

#[test]
fn ping_test() {
    let (mut client, remote, mut session) = setup();
    remote.push(b"PING :abc123\r\n");
    assert_eq!(client.process_pending_input(&mut session).unwrap(), 1);
    assert_eq!(remote.take_sent(), "PONG :abc123\r\n");
    assert!(session.channels().is_empty());
    assert!(session.system_messages().is_empty());
}

#[test]
fn partial_line_test() {
    let (mut client, remote, mut session) = setup();
    remote.push(b":irc.example.net 322 aoei #gen");
    assert_eq!(client.process_pending_input(&mut session).unwrap(), 0);
    assert!(session.channels().is_empty());
    assert_eq!(client.pending_input(), 30);

    remote.push(b"eral 1 :\r");
    assert_eq!(client.process_pending_input(&mut session).unwrap(), 0);
    assert!(session.channels().is_empty());

    remote.push(b"\nPING :x");
    assert_eq!(client.process_pending_input(&mut session).unwrap(), 1);
    assert_eq!(session.channels()[0].get_name(), "#general");
    assert_eq!(remote.take_sent(), "");

    remote.push(b"\r\n");
    assert_eq!(client.process_pending_input(&mut session).unwrap(), 1);
    assert_eq!(remote.take_sent(), "PONG :x\r\n");
    assert_eq!(client.pending_input(), 0);
}

#[test]
fn unknown_reply_recovery_test() {
    let (mut client, remote, mut session) = setup();
    remote.push(b":irc.example.net 999 aoei :what is this\r\n:irc.example.net 322 aoei #rust 1 :\r\n");
    match client.process_pending_input(&mut session) {
        Err(ClientError::Parse(err @ ParseError::UnknownReply(999))) => {
            assert_eq!(err.to_string(), "Unimplemented code: 999")
        }
        other => panic!("expected an unknown reply, got {:?}", other),
    }
    assert!(session.channels().is_empty());
    assert_eq!(client.process_pending_input(&mut session).unwrap(), 1);
    assert_eq!(session.channels()[0].get_name(), "#rust");
}

#[test]
fn unknown_command_recovery_test() {
    let (mut client, remote, mut session) = setup();
    remote.push(b":ferris!~f@crab.example PART #general :bye\r\nPING :still here\r\n");
    match client.process_pending_input(&mut session) {
        Err(ClientError::Parse(ParseError::UnknownCommand(verb))) => assert_eq!(verb, "PART"),
        other => panic!("expected an unknown command, got {:?}", other),
    }
    assert_eq!(client.process_pending_input(&mut session).unwrap(), 1);
    assert_eq!(remote.take_sent(), "PONG :still here\r\n");
}

#[test]
fn bad_line_split_across_reads_test() {
    let (mut client, remote, mut session) = setup();
    remote.push(b":ferris!~f@crab.example PRIVMSG aoei :psst, ");
    assert!(matches!(
        client.process_pending_input(&mut session),
        Err(ClientError::Parse(ParseError::UnsupportedTarget(_)))
    ));
    // the rest of the bad line hasn't arrived yet, nothing to do
    assert_eq!(client.process_pending_input(&mut session).unwrap(), 0);

    remote.push(b"over here\r\n:irc.example.net 001 aoei :hi\r\n");
    assert_eq!(client.process_pending_input(&mut session).unwrap(), 1);
    assert_eq!(system_texts(&session), vec!["hi"]);
}

#[test]
fn error_on_line_feed_test() {
    let (mut client, remote, mut session) = setup();
    remote.push(b"PING\n:irc.example.net 001 aoei :hi\r\n");
    match client.process_pending_input(&mut session) {
        Err(ClientError::Parse(ParseError::Unexpected { expected, got })) => {
            assert_eq!((expected, got), (b' ', b'\n'))
        }
        other => panic!("expected a bad PING, got {:?}", other),
    }
    // the LF was already eaten, the next line must survive
    assert_eq!(client.process_pending_input(&mut session).unwrap(), 1);
    assert_eq!(system_texts(&session), vec!["hi"]);
}

#[test]
fn peer_close_test() {
    let (mut client, remote, mut session) = setup();
    remote.push(b":irc.example.net 001 aoei :bye now\r\n:irc.example.net 001 aoei :half a li");
    remote.hang_up();
    assert_eq!(client.process_pending_input(&mut session).unwrap(), 1);
    assert_eq!(system_texts(&session), vec!["bye now"]);
    assert_eq!(client.is_connected(), false);
    assert!(client.pending_input() > 0, "the torn line is left where it is");

    assert_eq!(client.process_pending_input(&mut session).unwrap(), 0);
    assert!(matches!(client.join_channel("#rust"), Err(ClientError::Closed)));
}

#[test]
fn ping_after_peer_close_test() {
    let (mut client, remote, mut session) = setup();
    remote.push(
        b":irc.example.net 322 aoei #general 1 :\r\n\
          PING :x\r\n\
          :ferris!~f@crab.example PRIVMSG #general :last words\r\n",
    );
    remote.hang_up();
    assert_eq!(client.process_pending_input(&mut session).unwrap(), 3);
    assert_eq!(client.is_connected(), false);
    assert_eq!(remote.take_sent(), "", "no PONG once the peer is gone");
    assert_eq!(texts(&session, "#general"), vec!["last words"]);
}

#[test]
fn join_unknown_channel_test() {
    let (mut client, remote, mut session) = setup();
    remote.push(b":aoei!~a@localhost JOIN :#new\r\n:irc.example.net 001 aoei :still here\r\n");
    match client.process_pending_input(&mut session) {
        Err(ClientError::Irc(err)) => assert_eq!(err, IrcError::NoSuchChannel("#new".to_string())),
        other => panic!("expected NoSuchChannel, got {:?}", other),
    }
    assert!(session.channels().is_empty(), "a JOIN never creates a channel");
    assert_eq!(client.process_pending_input(&mut session).unwrap(), 1);
    assert_eq!(system_texts(&session), vec!["still here"]);
}

#[test]
fn bare_unknown_verb_test() {
    let (mut client, remote, mut session) = setup();
    remote.push(b":n!u@h AWAY\r\nPING :next\r\n");
    match client.process_pending_input(&mut session) {
        Err(ClientError::Parse(err @ ParseError::UnknownCommand(_))) => {
            assert_eq!(err.to_string(), "Unimplemented command: AWAY")
        }
        other => panic!("expected an unknown command, got {:?}", other),
    }
    assert_eq!(client.process_pending_input(&mut session).unwrap(), 1);
    assert_eq!(remote.take_sent(), "PONG :next\r\n");
}

#[test]
fn close_test() {
    let (mut client, remote, _) = setup();
    client.close();
    client.close();
    assert_eq!(client.is_connected(), false);
    assert!(client.stream().is_none());
    let err = client.send_message("hello", "#general").unwrap_err();
    assert!(matches!(err, ClientError::Closed));
    assert!(err.is_fatal());
    assert_eq!(remote.take_sent(), "");
}

#[test]
fn enter_channel_test() {
    let (mut client, remote, mut session) = setup();
    remote.push(GREETING.as_bytes());
    client.process_pending_input(&mut session).unwrap();

    match client.enter_channel(&mut session, 5) {
        Err(ClientError::Irc(err)) => {
            assert_eq!(err, IrcError::NoChannelAt(5));
            assert_eq!(err.to_string(), "No channel at index 5");
        }
        other => panic!("expected NoChannelAt, got {:?}", other),
    }
    assert_eq!(session.current_view(), View::System);
    assert_eq!(remote.take_sent(), "");

    client.enter_channel(&mut session, 1).unwrap();
    assert_eq!(session.current_view(), View::Channel(1));
    assert_eq!(remote.take_sent(), "JOIN #rust\r\n");

    // status text now lands in the channel being looked at
    remote.push(b":irc.example.net 255 aoei :I have 2 clients and 0 servers\r\n");
    client.process_pending_input(&mut session).unwrap();
    assert_eq!(texts(&session, "#rust"), vec!["I have 2 clients and 0 servers"]);
}

#[test]
fn say_test() {
    let (mut client, remote, mut session) = setup();
    remote.push(b":irc.example.net 322 aoei #general 1 :\r\n");
    client.process_pending_input(&mut session).unwrap();

    match client.say(&mut session, "anyone?") {
        Err(ClientError::Irc(err)) => assert_eq!(err, IrcError::NoChannelSelected),
        other => panic!("expected NoChannelSelected, got {:?}", other),
    }
    assert_eq!(remote.take_sent(), "");

    client.enter_channel(&mut session, 0).unwrap();
    remote.take_sent();
    client.say(&mut session, "hello there").unwrap();
    assert_eq!(remote.take_sent(), "PRIVMSG #general :hello there\r\n");
    let msgs = session.current_messages();
    assert_eq!(msgs.len(), 1);
    assert_eq!(msgs[0].sender, "aoei");
    assert_eq!(msgs[0].text, "hello there");
}
