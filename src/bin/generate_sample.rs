//! Writes a synthetic survey CSV for trying the analyzer by hand.
//!
//! Usage: `generate_sample [OUTPUT] [ROWS]` (defaults: `sample_survey.csv`, 200).

use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xoshiro256**) so samples are reproducible.
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
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// Pick from `options` using relative `weights`.
    fn weighted<'a>(&mut self, options: &[&'a str], weights: &[f64]) -> &'a str {
        let total: f64 = weights.iter().sum();
        let mut r = self.next_f64() * total;
        for (opt, w) in options.iter().zip(weights) {
            if r < *w {
                return opt;
            }
            r -= w;
        }
        options[options.len() - 1]
    }

    /// `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

const HEADER: [&str; 7] = [
    "respondent_id",
    "age",
    "gender",
    "department",
    "satisfaction",
    "recommend",
    "comment",
];

const DEPARTMENTS: [&str; 5] = ["Engineering", "Sales", "Support", "Marketing", "Finance"];
const DEPARTMENT_WEIGHTS: [f64; 5] = [0.35, 0.2, 0.2, 0.15, 0.1];
const COMMENTS: [&str; 5] = [
    "Great team",
    "Too many meetings",
    "Good benefits, slow processes",
    "Would like more training",
    "No complaints",
];

fn survey_row(rng: &mut SimpleRng, id: usize) -> Vec<String> {
    let age = rng.gauss(38.0, 9.0).clamp(18.0, 70.0).round() as i64;
    let gender = rng.weighted(&["Female", "Male", "Non-binary"], &[0.48, 0.48, 0.04]);
    let department = rng.weighted(&DEPARTMENTS, &DEPARTMENT_WEIGHTS);
    let satisfaction = rng.gauss(3.6, 0.9).clamp(1.0, 5.0).round() as i64;
    let recommend = if satisfaction >= 4 || rng.chance(0.2) { "Yes" } else { "No" };
    let comment = COMMENTS[(rng.next_u64() % COMMENTS.len() as u64) as usize];

    // A few blanks so missing-value handling shows up in the reports.
    let maybe = |rng: &mut SimpleRng, v: String| if rng.chance(0.05) { String::new() } else { v };

    vec![
        id.to_string(),
        maybe(rng, age.to_string()),
        gender.to_string(),
        department.to_string(),
        maybe(rng, satisfaction.to_string()),
        recommend.to_string(),
        maybe(rng, comment.to_string()),
    ]
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let output_path = args.next().unwrap_or_else(|| "sample_survey.csv".to_string());
    let rows: usize = match args.next() {
        Some(n) => n.parse().with_context(|| format!("invalid row count '{n}'"))?,
        None => 200,
    };

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;

    writer.write_record(HEADER).context("writing header")?;
    for id in 1..=rows {
        writer
            .write_record(survey_row(&mut rng, id))
            .with_context(|| format!("writing row {id}"))?;
    }
    writer.flush().context("flushing output")?;

    println!("Wrote {rows} survey responses to {output_path}");
    Ok(())
}
