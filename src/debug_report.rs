use gazex::{LookupResultVerbose, Span, to_bilou};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(tokens: &[&str], key_count: usize, res: &LookupResultVerbose, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Matching: \"{}\"", res.text), ansi::CYAN)));
    println!("{}", palette.dim(format!("   {} tokens against {} dictionary keys", tokens.len(), key_count)));

    println!("\n{}", palette.paint("━━━ Candidates ━━━", ansi::GRAY));
    println!(
        "  {} raw hits  │  {} token-aligned  │  {} dropped at boundaries",
        palette.paint(res.details.raw_hits.to_string(), ansi::BLUE),
        palette.paint(res.details.candidates.len().to_string(), ansi::GREEN),
        palette.dim(res.details.dropped.to_string()),
    );
    for (idx, span) in res.details.candidates.iter().enumerate() {
        println!("  {} {}", palette.paint(format!("[{}]", idx), ansi::GRAY), fmt_span(span, &palette));
    }

    println!("\n{}", palette.paint("━━━ Resolved ━━━", ansi::GRAY));
    if res.spans.is_empty() {
        println!("{}", palette.dim("  No spans survived"));
        println!("\n{}", palette.paint("Possible reasons:", ansi::YELLOW));
        println!("  • No dictionary key occurs in the input");
        println!("  • Every hit crossed a token boundary");
        println!("\n{}", palette.dim("  Tip: Set GAZEX_DEBUG=1 to see per-hit extraction details"));
    } else {
        for (idx, span) in res.spans.iter().enumerate() {
            println!("  {} {}", palette.paint(format!("[{}]", idx), ansi::GRAY), fmt_span(span, &palette));
        }

        println!("\n{}", palette.paint("━━━ Tags ━━━", ansi::GRAY));
        let tags = to_bilou(tokens.len(), &res.spans);
        for (token, tag) in tokens.iter().zip(&tags) {
            let painted =
                if tag == "O" { palette.dim(tag) } else { palette.paint(tag, ansi::GREEN) };
            println!("  {:<20} {}", token, painted);
        }
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Scan: {}  │  Extract: {}  │  Resolve: {}",
        palette.paint(format!("{:?}", res.details.total), ansi::GREEN),
        palette.paint(format!("{:?}", res.details.scan), ansi::CYAN),
        palette.dim(format!("{:?}", res.details.extract)),
        palette.dim(format!("{:?}", res.details.resolve)),
    );
    println!();
}

fn fmt_span(span: &Span, palette: &ansi::Palette) -> String {
    let labels = span.labels.iter().cloned().collect::<Vec<_>>().join(", ");
    format!(
        "{} {} {} {}",
        palette.bold(palette.paint(&span.text, ansi::GREEN)),
        palette.dim("│"),
        palette.paint(format!("tokens {}..{}", span.start, span.end), ansi::YELLOW),
        palette.paint(format!("{{{labels}}}"), ansi::BLUE),
    )
}
