#[macro_use]
extern crate clap;

use clap::{Arg, ArgGroup};
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;

#[derive(Debug)]
enum Error {
    Mex(meshcpu::CpuException),
    Io(std::io::Error),
    BadArgument(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Mex(err) => write!(f, "{}", err),
            Error::Io(err) => write!(f, "{}", err),
            Error::BadArgument(arg) => write!(
                f,
                "invalid --arg \"{}\", expected <letter>=<value>",
                arg
            ),
        }
    }
}

fn main() {
    env_logger::init();

    let matches = app_from_crate!()
        .arg(
            Arg::with_name("IMAGE")
                .help("Sets the image file to run")
                .index(1),
        )
        .arg(
            Arg::with_name("assembly")
                .short("a")
                .long("assembly")
                .takes_value(true)
                .value_name("ASSEMBLY")
                .help("Sets the assembly file to assemble and run"),
        )
        .arg(
            Arg::with_name("arg")
                .long("arg")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .value_name("LETTER=VALUE")
                .help("Binds a program variable before the run"),
        )
        .group(
            ArgGroup::with_name("input")
                .args(&["IMAGE", "assembly"])
                .required(true),
        )
        .get_matches();

    let arguments: Vec<&str> = matches
        .values_of("arg")
        .map(Iterator::collect)
        .unwrap_or_default();

    let result = run(
        matches.value_of("IMAGE"),
        matches.value_of("assembly"),
        &arguments,
    );

    match result {
        Ok(result) => println!("Result: {}", result),
        Err(err) => eprintln!("{}", err),
    }
}

fn run(image: Option<&str>, assembly: Option<&str>, arguments: &[&str]) -> Result<u8, Error> {
    let mut cpu = match image {
        Some(path) => {
            let file = File::open(path).map_err(Error::Io)?;
            mex::prepare_image(&mut BufReader::new(file)).map_err(Error::Mex)?
        }
        None => {
            let path = assembly.unwrap();
            let mut source = String::new();
            BufReader::new(File::open(path).map_err(Error::Io)?)
                .read_to_string(&mut source)
                .map_err(Error::Io)?;
            mex::prepare_source(&source).map_err(Error::Mex)?
        }
    };

    for argument in arguments {
        let (index, value) = parse_argument(argument)?;
        cpu.set_argument(index, value).map_err(Error::Mex)?;
    }

    cpu.start().map_err(Error::Mex)
}

// --arg c=3 binds variable "c" (slot 2) to 3.
fn parse_argument(argument: &str) -> Result<(usize, u8), Error> {
    let bad = || Error::BadArgument(argument.to_owned());

    let mut parts = argument.splitn(2, '=');
    let letter = parts.next().ok_or_else(bad)?;
    let value = parts.next().ok_or_else(bad)?;

    let bytes = letter.as_bytes();
    if bytes.len() != 1 || !bytes[0].is_ascii_lowercase() {
        return Err(bad());
    }
    let value: u8 = value.parse().map_err(|_| bad())?;

    Ok(((bytes[0] - b'a') as usize, value))
}
