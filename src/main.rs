/* rusty-ircc - an IRC client engine written in Rust
*  Copyright (C) Joanna Janet Zaitseva-Doyle <jjadoyle@gmail.com>

*  This program is free software: you can redistribute it and/or modify
*  it under the terms of the GNU Lesser General Public License as
*  published by the Free Software Foundation, either version 3 of the
*  License, or (at your option) any later version.

*  This program is distributed in the hope that it will be useful,
*  but WITHOUT ANY WARRANTY; without even the implied warranty of
*  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
*  GNU Lesser General Public License for more details.

*  You should have received a copy of the GNU Lesser General Public License
*  along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/
extern crate chrono;
extern crate env_logger;
extern crate log;
extern crate tokio;

use chrono::Local;
use clap::Parser;
use log::{error, info, warn};
use rusty_ircc::config::Config;
use rusty_ircc::{Client, ClientError, Session, View};
use std::process;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time;

// the terminal stands in for a real UI: it remembers how much of the
// current log has been printed and prints the rest each frame
struct Screen {
    view: Option<View>,
    shown: usize,
}

impl Screen {
    fn new() -> Screen {
        Screen { view: None, shown: 0 }
    }

    fn render(&mut self, session: &Session) {
        let view = session.current_view();
        if self.view != Some(view) {
            self.view = Some(view);
            self.shown = 0;
            match session.current_channel() {
                Some(chan) => println!("--- {} --- {}", chan.get_name(), chan.get_topic()),
                None => println!("--- server ---"),
            }
        }
        let msgs = session.current_messages();
        for msg in &msgs[self.shown..] {
            let time = msg.received.with_timezone(&Local).format("%H:%M");
            println!("[{}] <{}> {}", time, msg.nick(), msg.text);
        }
        self.shown = msgs.len();
    }
}

fn list_channels(session: &Session) {
    if session.channels().is_empty() {
        println!("*** no channels yet");
    }
    for (i, chan) in session.channels().iter().enumerate() {
        let mark = if chan.is_joined() { "*" } else { " " };
        println!("{:>3}{} {} {}", i, mark, chan.get_name(), chan.get_topic());
    }
}

// false once the user wants out
fn handle_input(client: &mut Client, session: &mut Session, line: &str) -> Result<bool, ClientError> {
    let line = line.trim_end();
    if line.is_empty() {
        return Ok(true);
    }
    let rest = match line.strip_prefix('/') {
        Some(rest) => rest,
        None => {
            client.say(session, line)?;
            return Ok(true);
        }
    };
    let mut words = rest.splitn(2, ' ');
    match (words.next().unwrap_or(""), words.next().map(str::trim)) {
        ("quit", _) => return Ok(false),
        ("list", _) => list_channels(session),
        ("system", _) => {
            session.select(View::System);
        }
        ("join", Some(arg)) => {
            let index = match arg.parse::<usize>() {
                Ok(i) => Some(i),
                Err(_) => session.channel_index(arg),
            };
            match index {
                Some(i) => client.enter_channel(session, i)?,
                None => println!("*** no such channel {}, try /list", arg),
            }
        }
        ("join", None) => println!("*** usage: /join <#channel|index>"),
        (cmd, _) => println!("*** unknown command /{}", cmd),
    }
    Ok(true)
}

fn die(err: ClientError) -> ! {
    error!("{}", err);
    eprintln!("rusty-ircc: {}", err);
    process::exit(1);
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let config = Config::parse();

    // resolving and connecting block, keep them off the runtime threads
    let (host, port, nick) = (config.server.clone(), config.port, config.nick.clone());
    let mut client = match tokio::task::spawn_blocking(move || Client::connect(&host, port, &nick)).await {
        Ok(Ok(client)) => client,
        Ok(Err(err)) => die(err),
        Err(err) => {
            error!("connect task failed: {}", err);
            process::exit(1);
        }
    };
    let mut session = Session::new(&config.nick);
    let mut screen = Screen::new();
    let mut ticker = time::interval(config.tick());
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                loop {
                    match client.process_pending_input(&mut session) {
                        Ok(_) => break,
                        Err(err) if config.lenient && !err.is_fatal() => warn!("skipped a line: {}", err),
                        Err(err) => die(err),
                    }
                }
                screen.render(&session);
                if !client.is_connected() {
                    println!("*** disconnected");
                    break;
                }
            }
            line = stdin.next_line() => {
                match line {
                    Ok(Some(line)) => match handle_input(&mut client, &mut session, &line) {
                        Ok(true) => screen.render(&session),
                        Ok(false) => break,
                        Err(err) if err.is_fatal() => die(err),
                        Err(err) => println!("*** {}", err),
                    },
                    Ok(None) => break,
                    Err(err) => {
                        error!("reading stdin: {}", err);
                        break;
                    }
                }
            }
        }
    }
    info!("bye");
    client.close();
}
