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
use std::{error, fmt};

// errors from applying an already parsed line to the session;
// the line itself has been consumed by the time one of these is raised
impl error::Error for Error {}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::NoSuchChannel(chan) => write!(f, "{} :No such channel", chan),
            Error::NoChannelAt(index) => write!(f, "No channel at index {}", index),
            Error::NoChannelSelected => write!(f, "No channel selected"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Error {
    NoSuchChannel(String),
    NoChannelAt(usize),
    NoChannelSelected,
}
