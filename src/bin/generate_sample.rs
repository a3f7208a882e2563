use std::path::PathBuf;

use anyhow::{Context, Result};
use encoding_rs::EUC_KR;

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
}

const REGIONS: [(&str, f64); 17] = [
    ("서울특별시", 1.30),
    ("부산광역시", 0.80),
    ("대구광역시", 0.70),
    ("인천광역시", 0.90),
    ("광주광역시", 0.75),
    ("대전광역시", 0.80),
    ("울산광역시", 1.70),
    ("세종특별자치시", 1.00),
    ("경기도", 1.00),
    ("강원도", 0.85),
    ("충청북도", 1.20),
    ("충청남도", 1.55),
    ("전라북도", 0.80),
    ("전라남도", 1.25),
    ("경상북도", 1.05),
    ("경상남도", 0.95),
    ("제주특별자치도", 0.80),
];

/// Metric name, national level in the first year (thousand won), yearly growth.
const METRICS: [(&str, f64, f64); 3] = [
    ("1인당 지역내총생산", 33_000.0, 0.035),
    ("1인당 지역총소득", 31_000.0, 0.030),
    ("1인당 개인소득", 18_000.0, 0.040),
];

const FIRST_YEAR: i32 = 2015;
const LAST_FINAL_YEAR: i32 = 2022;

fn thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.round());
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn main() -> Result<()> {
    env_logger::init();

    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_regional_income.csv"));

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["시도별".to_string(), "항목".to_string()];
    header.extend((FIRST_YEAR..=LAST_FINAL_YEAR).map(|y| y.to_string()));
    header.push(format!("{} p)", LAST_FINAL_YEAR + 1));
    writer.write_record(&header).context("writing header")?;

    let year_count = header.len() - 2;
    let mut rows = 0usize;
    for &(metric, base, growth) in &METRICS {
        for &(region, level) in &REGIONS {
            let mut record = vec![region.to_string(), metric.to_string()];
            for step in 0..year_count {
                // Sejong was not reported in the first years.
                if region.starts_with("세종") && step < 2 {
                    record.push("-".to_string());
                    continue;
                }
                let trend = base * level * (1.0 + growth).powi(step as i32);
                let value = rng.gauss(trend, trend * 0.01);
                record.push(thousands(value));
            }
            writer.write_record(&record).context("writing record")?;
            rows += 1;
        }
    }

    let buffer = writer
        .into_inner()
        .map_err(|e| e.into_error())
        .context("flushing CSV")?;
    let text = String::from_utf8(buffer)
        .context("CSV output is not UTF-8")?;
    let (bytes, _, _) = EUC_KR.encode(&text);
    std::fs::write(&output_path, &bytes)
        .with_context(|| format!("writing {}", output_path.display()))?;

    log::info!("encoded {} bytes as {}", bytes.len(), EUC_KR.name());
    println!(
        "Wrote {rows} rows ({} metrics × {} regions, {year_count} years) to {}",
        METRICS.len(),
        REGIONS.len(),
        output_path.display()
    );
    Ok(())
}
