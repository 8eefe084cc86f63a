use std::error::Error;

/// Tiny deterministic LCG, enough to vary the demo rows.
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Lcg { state: seed }
    }

    fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.state >> 33) as u32
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.next_u32() as usize % items.len()]
    }

    fn range(&mut self, lo: u32, hi: u32) -> u32 {
        lo + self.next_u32() % (hi - lo)
    }
}

/// Write a sample sales CSV that the workbench can load and score.
fn main() -> Result<(), Box<dyn Error>> {
    let mut rng = Lcg::new(42);

    let regions = ["north", "south", "east", "west"];
    let products = ["SR-100", "SR-200", "HY-350", "HY-500"];

    let output_path = "sample_sales.csv";
    let mut writer = csv::Writer::from_path(output_path)?;
    writer.write_record(["region", "product", "unit_price", "quantity", "promo"])?;

    let rows = 60;
    for _ in 0..rows {
        let region = rng.pick(&regions);
        let product = rng.pick(&products);
        let unit_price = rng.range(120, 480) as f64 / 10.0;
        let quantity = rng.range(1, 250);
        let promo = rng.next_u32() % 5 == 0;

        writer.write_record([
            region.to_string(),
            product.to_string(),
            format!("{unit_price:.1}"),
            quantity.to_string(),
            promo.to_string(),
        ])?;
    }
    writer.flush()?;

    println!("Wrote {rows} rows to {output_path}");
    Ok(())
}
