use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const COUNTRIES: [&str; 10] = [
    "United States",
    "India",
    "United Kingdom",
    "Japan",
    "South Korea",
    "Canada",
    "France",
    "Spain",
    "Mexico",
    "United States, Canada",
];

const MOVIE_GENRES: [&str; 8] = [
    "Dramas",
    "Comedies",
    "International Movies",
    "Documentaries",
    "Action & Adventure",
    "Thrillers",
    "Romantic Movies",
    "Horror Movies",
];

const TV_GENRES: [&str; 6] = [
    "International TV Shows",
    "TV Dramas",
    "TV Comedies",
    "Crime TV Shows",
    "Kids' TV",
    "Docuseries",
];

const RATINGS: [&str; 7] = ["TV-MA", "TV-14", "TV-PG", "R", "PG-13", "PG", "TV-Y7"];

#[derive(Serialize)]
struct Row {
    show_id: String,
    #[serde(rename = "type")]
    kind: &'static str,
    title: String,
    country: String,
    date_added: String,
    release_year: i32,
    rating: String,
    duration: String,
    listed_in: String,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }

    fn chance(&mut self, percent: usize) -> bool {
        self.below(100) < percent
    }
}

/// The raw `date_added` text, including the blank and messy values real
/// exports contain.
fn date_added(rng: &mut SimpleRng) -> String {
    if rng.chance(3) {
        return String::new();
    }
    if rng.chance(1) {
        return "unknown".to_string();
    }
    let year = 2015 + rng.below(7);
    let month = MONTHS[rng.below(12)];
    let day = 1 + rng.below(28);
    let padding = if rng.chance(10) { " " } else { "" };
    format!("{padding}{month} {day}, {year}")
}

fn genres(rng: &mut SimpleRng, pool: &[&str]) -> String {
    let n = 1 + rng.below(3);
    let mut picked: Vec<&str> = Vec::with_capacity(n);
    while picked.len() < n {
        let g = rng.pick(pool);
        if !picked.contains(&g) {
            picked.push(g);
        }
    }
    picked.join(", ")
}

fn main() -> Result<()> {
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("netflix_titles.csv"));
    let count = 2000;

    let mut rng = SimpleRng::new(42);
    let mut writer =
        csv::Writer::from_path(&path).with_context(|| format!("creating {}", path.display()))?;

    for i in 0..count {
        let is_movie = rng.chance(70);
        let row = Row {
            show_id: format!("s{}", i + 1),
            kind: if is_movie { "Movie" } else { "TV Show" },
            title: format!("Sample Title {}", i + 1),
            country: if rng.chance(8) {
                String::new()
            } else {
                rng.pick(&COUNTRIES).to_string()
            },
            date_added: date_added(&mut rng),
            release_year: 1990 + rng.below(32) as i32,
            rating: if rng.chance(2) {
                String::new()
            } else {
                rng.pick(&RATINGS).to_string()
            },
            duration: if is_movie {
                format!("{} min", 70 + rng.below(80))
            } else {
                format!("{} Seasons", 1 + rng.below(5))
            },
            listed_in: genres(&mut rng, if is_movie { &MOVIE_GENRES[..] } else { &TV_GENRES[..] }),
        };
        writer.serialize(row)?;
    }
    writer.flush()?;

    println!("Wrote {count} titles to {}", path.display());
    Ok(())
}
