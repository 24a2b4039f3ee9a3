use std::fs::File;
use std::io;
use std::io::prelude::*;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use nom::{
    character::complete::{digit1, one_of},
    combinator::{all_consuming, map_res, opt, recognize},
    sequence::tuple,
    IResult,
};
use thiserror::Error;
use tracing::{event, span, Level};
use tracing_subscriber::prelude::*;

/// The puzzle input is always read from here, relative to the
/// current directory.
const INPUT_FILE: &str = "input.txt";

type Reading = i32;

/// Window sums are kept wider than a single reading so that three
/// extreme readings cannot overflow.
type WindowSum = i64;

#[derive(Debug, Error)]
enum LoadError {
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read input: {source}")]
    Read {
        #[source]
        source: io::Error,
    },
    #[error("line {line}: expected an integer, got '{text}'")]
    Parse { line: usize, text: String },
}

fn i32_parser(input: &str) -> IResult<&str, i32> {
    map_res(
        recognize(tuple((opt(one_of("+-")), digit1))),
        FromStr::from_str,
    )(input)
}

fn parse_reading(s: &str) -> Option<Reading> {
    match all_consuming(i32_parser)(s) {
        Ok((_, n)) => Some(n),
        Err(_) => None,
    }
}

#[test]
fn test_parse_reading() {
    assert_eq!(Some(199), parse_reading("199"));
    assert_eq!(Some(0), parse_reading("0"));
    assert_eq!(Some(-42), parse_reading("-42"));
    assert_eq!(Some(7), parse_reading("+7"));
    assert_eq!(Some(i32::MAX), parse_reading("2147483647"));
    assert_eq!(Some(i32::MIN), parse_reading("-2147483648"));
    assert_eq!(None, parse_reading(""));
    assert_eq!(None, parse_reading("-"));
    assert_eq!(None, parse_reading("abc"));
    assert_eq!(None, parse_reading("12abc"));
    assert_eq!(None, parse_reading("1 2"));
    assert_eq!(None, parse_reading("2147483648"));
}

/// Reads one integer per line.  Surrounding whitespace is ignored
/// and blank lines are skipped; anything else that is not an integer
/// is rejected.
fn load_readings<R: BufRead>(reader: R) -> Result<Vec<Reading>, LoadError> {
    let mut readings: Vec<Reading> = Vec::new();
    let mut lines_seen: usize = 0;
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| LoadError::Read { source })?;
        lines_seen += 1;
        let text = line.trim();
        if text.is_empty() {
            event!(Level::DEBUG, "skipping blank line {}", index + 1);
            continue;
        }
        match parse_reading(text) {
            Some(n) => readings.push(n),
            None => {
                return Err(LoadError::Parse {
                    line: index + 1,
                    text: text.to_string(),
                });
            }
        }
    }
    event!(
        Level::DEBUG,
        "{} lines, {} readings",
        lines_seen,
        readings.len()
    );
    Ok(readings)
}

#[test]
fn test_load_readings() {
    let input = "199\n200 \n  208\r\n\n-3\n+4\n";
    assert_eq!(vec![199, 200, 208, -3, 4], load_readings(input.as_bytes()).unwrap());
    assert!(load_readings("".as_bytes()).unwrap().is_empty());
    assert!(load_readings("\n\n   \n".as_bytes()).unwrap().is_empty());
}

#[test]
fn test_load_readings_rejects_junk() {
    match load_readings("1\n2\nthree\n4\n".as_bytes()) {
        Err(LoadError::Parse { line, text }) => {
            assert_eq!(3, line);
            assert_eq!("three", text);
        }
        other => panic!("expected a parse error, got {:?}", other),
    }
    match load_readings("1\n99999999999\n".as_bytes()) {
        Err(LoadError::Parse { line, .. }) => assert_eq!(2, line),
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test]
fn test_load_readings_rejects_invalid_utf8() {
    match load_readings(&b"1\n\xff\n"[..]) {
        Err(LoadError::Read { .. }) => (),
        other => panic!("expected a read error, got {:?}", other),
    }
}

fn read_input_file(path: &Path) -> Result<Vec<Reading>, LoadError> {
    let span = span!(Level::INFO, "load", path = %path.display());
    let _enter = span.enter();
    event!(Level::INFO, "reading {}", path.display());
    let f = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    load_readings(io::BufReader::new(f))
}

#[test]
fn test_read_input_file_missing() {
    let path = Path::new("/nonexistent/day01/input.txt");
    match read_input_file(path) {
        Err(LoadError::Open { path: p, .. }) => assert_eq!(path, p.as_path()),
        other => panic!("expected an open error, got {:?}", other),
    }
}

fn count_simple_increases(readings: &[Reading]) -> usize {
    readings.windows(2).filter(|w| w[1] > w[0]).count()
}

fn count_window_increases(readings: &[Reading]) -> usize {
    // None until the first complete window has been seen, so that a
    // window summing to zero is still compared against.
    let mut previous: Option<WindowSum> = None;
    let mut increases = 0;
    for w in readings.windows(3) {
        let sum: WindowSum = w.iter().map(|&r| WindowSum::from(r)).sum();
        if let Some(prev) = previous {
            event!(Level::TRACE, "window {:?}: {} vs {}", w, prev, sum);
            if sum > prev {
                increases += 1;
            }
        }
        previous = Some(sum);
    }
    increases
}

#[cfg(test)]
const EXAMPLE: [Reading; 10] = [199, 200, 208, 210, 200, 207, 240, 269, 260, 263];

#[test]
fn test_count_simple_increases() {
    assert_eq!(0, count_simple_increases(&[]));
    assert_eq!(0, count_simple_increases(&[5]));
    assert_eq!(2, count_simple_increases(&[1, 2, 3]));
    assert_eq!(0, count_simple_increases(&[3, 2, 1]));
    assert_eq!(0, count_simple_increases(&[4, 4, 4, 4]));
    assert_eq!(3, count_simple_increases(&[-5, -4, -3, -2]));
    assert_eq!(7, count_simple_increases(&EXAMPLE));

    let increasing: Vec<Reading> = (0..100).collect();
    assert_eq!(99, count_simple_increases(&increasing));
}

#[test]
fn test_count_simple_increases_is_order_sensitive() {
    let mut reversed = EXAMPLE;
    reversed.reverse();
    assert_eq!(2, count_simple_increases(&reversed));
}

#[test]
fn test_count_window_increases() {
    assert_eq!(0, count_window_increases(&[]));
    assert_eq!(0, count_window_increases(&[1]));
    assert_eq!(0, count_window_increases(&[1, 2]));
    assert_eq!(0, count_window_increases(&[1, 2, 3]));
    assert_eq!(1, count_window_increases(&[1, 2, 3, 4]));
    assert_eq!(0, count_window_increases(&[7, 7, 7, 7, 7]));
    assert_eq!(5, count_window_increases(&EXAMPLE));
}

#[test]
fn test_count_window_increases_from_zero_sum() {
    // Windows sum to 0 then 6.
    assert_eq!(1, count_window_increases(&[-1, 0, 1, 5]));
    // Windows sum to -12 then -9.
    assert_eq!(1, count_window_increases(&[-5, -4, -3, -2]));
    // Windows sum to 0, 0, 1.
    assert_eq!(1, count_window_increases(&[0, 0, 0, 0, 1]));
}

#[test]
fn test_count_window_increases_does_not_overflow() {
    let big = [i32::MAX, i32::MAX, i32::MAX, i32::MAX];
    assert_eq!(0, count_window_increases(&big));
    let climbing = [i32::MIN, i32::MAX, i32::MAX, i32::MAX];
    assert_eq!(1, count_window_increases(&climbing));
}

fn report(readings: &[Reading]) -> String {
    format!(
        "{} data points found\nPart 1: {} increases found\nPart 2: {} increases found\n",
        readings.len(),
        count_simple_increases(readings),
        count_window_increases(readings),
    )
}

#[test]
fn test_report() {
    assert_eq!(
        "10 data points found\nPart 1: 7 increases found\nPart 2: 5 increases found\n",
        report(&EXAMPLE)
    );
    assert_eq!(
        "0 data points found\nPart 1: 0 increases found\nPart 2: 0 increases found\n",
        report(&[])
    );
}

fn main() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(io::stderr);
    let filter_layer = match tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("warn"))
    {
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
        Ok(layer) => layer,
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    match read_input_file(Path::new(INPUT_FILE)) {
        Ok(readings) => {
            print!("{}", report(&readings));
        }
        Err(e) => {
            eprintln!("day01: {}", e);
            std::process::exit(1);
        }
    }
}
