use canopy_core::pipeline::SeriesAnalysis;
use console::Style;

struct Styles {
    header: Style,
    label: Style,
    value: Style,
    positive: Style,
    negative: Style,
    disabled: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            positive: Style::new().green(),
            negative: Style::new().red(),
            disabled: Style::new().dim().yellow(),
        }
    }

    fn rate(&self, rate: f64) -> String {
        let text = format!("{:+.2}%", rate);
        if rate > 0.0 {
            self.positive.apply_to(text).to_string()
        } else if rate < 0.0 {
            self.negative.apply_to(text).to_string()
        } else {
            self.value.apply_to(text).to_string()
        }
    }
}

pub fn print_series_summary(analysis: &SeriesAnalysis) {
    let s = Styles::new();

    println!();
    println!("  {}", s.header.apply_to("Vegetation"));
    for m in &analysis.measurements {
        println!(
            "    {:<32}{}",
            s.label.apply_to(&m.source),
            s.value.apply_to(format!("{:.2}%", m.vegetation_fraction))
        );
    }

    println!();
    println!("  {}", s.header.apply_to("Growth"));
    if analysis.growth_rates.is_empty() {
        println!("    {}", s.disabled.apply_to("no comparable pairs"));
    }
    for entry in &analysis.growth_rates {
        println!(
            "    {:<32}{}",
            s.label
                .apply_to(format!("{} -> {}", entry.from.source, entry.to.source)),
            s.rate(entry.growth_rate_percent)
        );
    }

    let summary = &analysis.summary;
    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Net change"),
        summary
            .net_growth_percent
            .map(|r| s.rate(r))
            .unwrap_or_else(|| s.disabled.apply_to("n/a").to_string())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Mean rate"),
        summary
            .mean_growth_percent
            .map(|r| s.rate(r))
            .unwrap_or_else(|| s.disabled.apply_to("n/a").to_string())
    );

    if !analysis.skipped.is_empty() {
        println!();
        println!("  {}", s.header.apply_to("Skipped"));
        for (source, reason) in &analysis.skipped {
            println!(
                "    {:<32}{}",
                s.label.apply_to(source),
                s.disabled.apply_to(reason)
            );
        }
    }
}
