// Copyright 2025 Servus Altissimi (Pseudonym)

// Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:
// The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use netcalc::prelude::*;
use netcalc::network::transmission_time;
use netcalc::report;

use clap::{Parser, Subcommand};
use anyhow::Result;
use std::path::PathBuf;
use tracing::{info, Level};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Time to put one packet on the link (ms)
    Transmission {
        #[arg(short, long, default_value_t = 1000)]
        length: u64,
        #[arg(short, long, default_value_t = 1000.0)]
        rate: f64,
    },
    
    /// Stop-and-wait or pipelined link utilization
    Utilization {
        #[arg(short, long, default_value_t = 1000)]
        length: u64,
        #[arg(short, long, default_value_t = 1000.0)]
        rate: f64,
        #[arg(long, default_value_t = 30.0)]
        rtt: f64,
        #[arg(short, long)]
        window: Option<u64>,
    },
    
    /// Per-file completion times on a round-robin shared link
    Multiplex {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        rate: Option<f64>,
        #[arg(long)]
        start: Option<f64>,
        #[arg(long)]
        payload: Option<u64>,
        #[arg(long)]
        header: Option<u64>,
        /// Comma separated, e.g. 3MiB,165KiB
        #[arg(short, long)]
        files: Option<String>,
        #[arg(short = 'n', long)]
        senders: Option<usize>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    
    /// Runs the worked examples
    Demo,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
    
    match cli.command {
        Commands::Transmission { length, rate } => {
            let ms = transmission_time(length, rate)?;
            println!("\ntransmission time: {}ms", ms);
        }
        
        Commands::Utilization { length, rate, rtt, window } => {
            let input = UtilizationInput {
                length_bytes: length,
                rate_mbps: rate,
                rtt_ms: rtt,
                window_size_bytes: window,
            };
            print_utilization(&input)?;
        }
        
        Commands::Multiplex {
            config,
            rate,
            start,
            payload,
            header,
            files,
            senders,
            output,
        } => {
            let overrides = MultiplexOverrides {
                rate_mbps: rate,
                start_seconds: start,
                payload_bytes: payload,
                header_bytes: header,
                files,
                senders,
            };
            let config = load_multiplex_config(config, overrides)?;
            run_multiplex(config, output)?;
        }
        
        Commands::Demo => {
            info!("Stop-and-wait vs pipelining: 1000 B packets, 1 Gbps, 30 ms RTT, 5020 B window");
            print_utilization(&UtilizationInput::default())?;
            
            info!("Two senders sharing 5.2 Mbps: 3 MiB and 165 KiB files");
            run_multiplex(MultiplexConfig::default(), None)?;
        }
    }
    
    Ok(())
}

fn print_utilization(input: &UtilizationInput) -> Result<()> {
    let report = UtilizationReport::compute(input)?;
    println!("\n{}", report::utilization_summary(&report));
    Ok(())
}

fn load_multiplex_config(path: Option<PathBuf>, overrides: MultiplexOverrides) -> Result<MultiplexConfig> {
    let config = match path {
        Some(path) => {
            info!("Loading config from: {}", path.display());
            MultiplexConfig::from_json_file(path)?
        }
        None => MultiplexConfig::default(),
    };
    
    Ok(overrides.apply(config)?)
}

fn run_multiplex(config: MultiplexConfig, output: Option<PathBuf>) -> Result<()> {
    let schedule = MultiplexingScheduler::new(config)?.run()?;
    
    println!(
        "\ntransmission delay with statistical multiplexing: {}",
        report::completions_summary(&schedule)
    );
    report::schedule_table(&schedule);
    
    if let Some(dir) = output {
        report::save_schedule(&schedule, dir, "multiplex")?;
    }
    
    Ok(())
}
