//! Stdin-driven hit counter over the LFU cache.
//!
//! Input is whitespace-separated: a capacity, then a stream of integer keys.
//! Each key already in the cache counts as a hit (and is promoted); each
//! missing key is inserted with itself as the value and counts as a miss.
//! Reading stops at the first non-integer token. The total hit count is
//! printed on exit.
//!
//! With `--trace`, the frequency-bucket chain is dumped after every
//! operation, one `freq N: keys...` line per bucket from the minimum
//! frequency upward.

use std::error::Error;
use std::fmt::Write as _;
use std::io::Read;
use std::process::ExitCode;

use lfukit::policy::lfu::LfuCache;

fn lookup_update(cache: &mut LfuCache<i64, i64>, key: i64) -> Result<bool, Box<dyn Error>> {
    if cache.contains(&key) {
        cache.get(&key)?;
        Ok(true)
    } else {
        cache.insert(key, key)?;
        Ok(false)
    }
}

fn render_chain(cache: &LfuCache<i64, i64>) -> String {
    let mut out = String::new();
    for bucket in cache.buckets() {
        let _ = write!(out, "freq {}:", bucket.freq());
        for key in bucket.keys() {
            let _ = write!(out, " {key}");
        }
        out.push('\n');
    }
    out
}

fn run(input: &str, trace: bool) -> Result<u64, Box<dyn Error>> {
    let mut tokens = input.split_whitespace();
    let capacity: usize = tokens.next().ok_or("missing capacity")?.parse()?;
    let mut cache = LfuCache::new(capacity)?;

    let mut hits = 0u64;
    for token in tokens {
        let key: i64 = match token.parse() {
            Ok(key) => key,
            Err(_) => break,
        };
        if lookup_update(&mut cache, key)? {
            hits += 1;
        }
        if trace {
            print!("{}", render_chain(&cache));
        }
    }
    Ok(hits)
}

fn main() -> ExitCode {
    let trace = std::env::args().skip(1).any(|arg| arg == "--trace");

    let mut input = String::new();
    if let Err(err) = std::io::stdin().read_to_string(&mut input) {
        eprintln!("hitcount: {err}");
        return ExitCode::FAILURE;
    }

    match run(&input, trace) {
        Ok(hits) => {
            println!("{hits}");
            ExitCode::SUCCESS
        },
        Err(err) => {
            eprintln!("hitcount: {err}");
            ExitCode::FAILURE
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_hits_with_eviction() {
        // cap=2: 1 miss, 2 miss, 1 hit, 3 miss (evicts 2), 2 miss (evicts 3).
        assert_eq!(run("2 1 2 1 3 2", false).unwrap(), 1);
    }

    #[test]
    fn stops_at_first_non_integer_token() {
        assert_eq!(run("2 1 1 end 1 1", false).unwrap(), 1);
    }

    #[test]
    fn rejects_zero_capacity() {
        assert!(run("0 1 2 3", false).is_err());
    }

    #[test]
    fn missing_capacity_is_an_error() {
        assert!(run("", false).is_err());
    }

    #[test]
    fn render_chain_lists_buckets_min_first() {
        let mut cache = LfuCache::new(3).unwrap();
        cache.insert(1, 1).unwrap();
        cache.insert(2, 2).unwrap();
        cache.get(&1).unwrap();

        assert_eq!(render_chain(&cache), "freq 1: 2\nfreq 2: 1\n");
    }
}
