use console::Style;
use reap_core::pipeline::config::HarvestConfig;
use reap_core::pipeline::HarvestSummary;
use reap_core::series::BuildReport;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_run_summary(config: &HarvestConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Reap Harvest Mapping"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(20)));
    println!();

    for (label, paths) in [
        ("NDVI", &config.inputs.ndvi),
        ("HPI", &config.inputs.hpi),
        ("NDSI", &config.inputs.ndsi),
    ] {
        for (i, path) in paths.iter().enumerate() {
            let label = if i == 0 { label } else { "" };
            println!(
                "  {:<14}{}",
                s.label.apply_to(label),
                s.path.apply_to(path.display())
            );
        }
    }
    if let Some(ref crop) = config.inputs.crop_raster {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Crops"),
            s.path.apply_to(crop.display())
        );
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.output.display())
    );
    println!();

    println!("  {}", s.header.apply_to("Season"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Year"),
        s.value.apply_to(config.year)
    );
    if let Ok((start, end)) = config.season_bounds() {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Dates"),
            s.value.apply_to(format!("{} .. {}", start, end))
        );
    }
    println!();

    let d = &config.detection;
    println!("  {}", s.header.apply_to("Detection"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Threshold"),
        s.value.apply_to(d.nhpi_threshold)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("HPI bound"),
        s.value.apply_to(d.hpi_upper_bound)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Min peak"),
        s.value.apply_to(d.min_peak_hpi)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Window"),
        s.value.apply_to(format!(
            "{} days, {} days lead-in",
            d.window_length_days, d.window_lead_in_days
        ))
    );
    match config.snow_threshold() {
        Some(t) => println!(
            "    {:<12}{}",
            s.label.apply_to("Snow mask"),
            s.value.apply_to(format!("NDSI >= {}", t))
        ),
        None => println!(
            "    {:<12}{}",
            s.label.apply_to("Snow mask"),
            s.disabled.apply_to("disabled")
        ),
    }
    println!(
        "    {:<12}{}",
        s.label.apply_to("Crops"),
        s.value.apply_to(format!(
            "corn = {}, soybean = {}",
            config.crops.corn, config.crops.soybean
        ))
    );
    println!();
}

pub fn print_result_summary(summary: &HarvestSummary, report: &BuildReport) {
    let s = Styles::new();

    println!();
    println!("  {}", s.header.apply_to("Series"));
    println!(
        "    {:<16}{}",
        s.label.apply_to("Scenes"),
        s.value.apply_to(format!(
            "{} NDVI, {} HPI, {} NDSI",
            report.ndvi_scenes, report.hpi_scenes, report.ndsi_scenes
        ))
    );
    println!(
        "    {:<16}{}",
        s.label.apply_to("Dates"),
        s.value.apply_to(report.dates)
    );
    if report.outside_season > 0 {
        println!(
            "    {:<16}{}",
            s.label.apply_to("Off-season"),
            s.disabled.apply_to(report.outside_season)
        );
    }
    if report.snow_masked > 0 {
        println!(
            "    {:<16}{}",
            s.label.apply_to("Snow-masked"),
            s.disabled.apply_to(report.snow_masked)
        );
    }
    println!();

    println!("  {}", s.header.apply_to("Pixels"));
    let pct = |n: usize| {
        if summary.pixels == 0 {
            0.0
        } else {
            n as f64 * 100.0 / summary.pixels as f64
        }
    };
    for (label, count) in [
        ("Harvested", summary.harvested),
        ("  edge", summary.edge),
        ("Not corn/soy", summary.non_target_crop),
        ("Weak signal", summary.weak_signal),
        ("No decay", summary.no_window),
        ("Flat HPI", summary.degenerate_range),
        ("No crossing", summary.no_crossing),
    ] {
        println!(
            "    {:<16}{} ({:.1}%)",
            s.label.apply_to(label),
            s.value.apply_to(count),
            pct(count)
        );
    }

    if let (Some(min), Some(max), Some(mean)) = (summary.min_doy, summary.max_doy, summary.mean_doy)
    {
        println!();
        println!("  {}", s.header.apply_to("Harvest DOY"));
        println!(
            "    {:<16}{}",
            s.label.apply_to("Range"),
            s.value.apply_to(format!("{:.2} .. {:.2}", min, max))
        );
        println!(
            "    {:<16}{}",
            s.label.apply_to("Mean"),
            s.value.apply_to(format!("{:.2}", mean))
        );
    }
}
