use colored::Colorize;

use crate::{Booster, WeakLearner};
use crate::error::Result;

use std::ops::ControlFlow;
use std::time::Instant;


const WIDTH: usize = 8;
const PREC_WIDTH: usize = 5;
const FULL_WIDTH: usize = 60;
const STAT_WIDTH: usize = (FULL_WIDTH - 4) / 2;


/// Read the training loss after the latest round.
pub trait RoundLoss {
    /// `None` if the loss has no pointwise value or no round has run yet.
    fn round_loss(&self) -> Option<f64>;
}


/// Runs a booster and prints its settings
/// and a colored per-round table of loss and running time.
pub struct ProgressLogger<'b, B, W> {
    booster: &'b mut B,
    weak_learner: &'b W,
    round: usize,
}


impl<'b, B, W> ProgressLogger<'b, B, W> {
    /// Create a new instance of `ProgressLogger`.
    /// By default, every round is printed.
    pub fn new(booster: &'b mut B, weak_learner: &'b W) -> Self {
        Self { booster, weak_learner, round: 1 }
    }


    /// Set the interval to print the current status.
    /// If you don't want the per-round lines, set `usize::MAX`.
    pub fn print_every(mut self, round: usize) -> Self {
        self.round = round.max(1);
        self
    }
}


impl<F, B, W> ProgressLogger<'_, B, W>
    where B: Booster<F> + RoundLoss,
          W: WeakLearner<Hypothesis = F>,
{
    fn print_log_header(&self) {
        println!(
            "      {:>WIDTH$}\t\t{:>WIDTH$}\t{:>WIDTH$}",
            "".bold().red(),
            "TRAIN".bold().green(),
            "".bold().cyan(),
        );
        println!(
            "      {:>WIDTH$}\t\t{:>WIDTH$}\t{:>WIDTH$}\n",
            "ROUND".bold().red(),
            "LOSS".bold().green(),
            "TIME".bold().cyan(),
        );
    }


    fn print_stats(&self) {
        let header = format!(
            "{:=>FULL_WIDTH$}\n{:^FULL_WIDTH$}\n{:->FULL_WIDTH$}",
            "", "STATS".bold(), "",
        );
        println!(
            "\n{header}\n\
            + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}",
            "Booster".bold(),
            self.booster.name().bold().green(),
        );
        if let Some(info) = self.booster.info() {
            println!("{}", info_lines(info));
        }

        println!(
            "+ {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}",
            "Weak Learner".bold(),
            self.weak_learner.name().bold().green(),
        );
        if let Some(info) = self.weak_learner.info() {
            println!("{}", info_lines(info));
        }
        println!("{:=^FULL_WIDTH$}\n", "".bold());
    }


    /// Run the booster, printing one line every `print_every` rounds.
    /// Returns what [`Booster::run`] would.
    pub fn run(&mut self) -> Result<B::Output> {
        self.booster.preprocess(self.weak_learner)?;
        self.print_stats();
        if self.round != usize::MAX { self.print_log_header(); }

        let mut time_acc = 0;
        let mut failure = None;
        let _ = (1..).try_for_each(|iter| {
            let now = Instant::now();
            let flow = match self.booster.boost(self.weak_learner, iter) {
                Ok(flow) => flow,
                Err(e) => {
                    failure = Some(e);
                    return ControlFlow::Break(iter);
                },
            };
            time_acc += now.elapsed().as_millis();

            let loss = loss_format(self.booster.round_loss());
            if flow.is_break() {
                if self.round != usize::MAX {
                    println!(
                        "{} {}\t\t{}\t{}\n",
                        "[FIN]".bold().bright_green(),
                        format!("{:>WIDTH$}", iter - 1).red(),
                        loss.bold().green(),
                        time_format(time_acc).bold().cyan(),
                    );
                }
                return flow;
            }

            if self.round != usize::MAX && iter % self.round == 0 {
                println!(
                    "{} {}\t\t{}\t{}",
                    "[LOG]".bold().magenta(),
                    format!("{:>WIDTH$}", iter).red(),
                    loss.green(),
                    time_format(time_acc).bold().cyan(),
                );
            }
            flow
        });

        if let Some(e) = failure {
            return Err(e);
        }
        self.booster.postprocess(self.weak_learner)
    }
}


fn info_lines(info: Vec<(&str, String)>) -> String {
    info.into_iter()
        .map(|(key, val)| {
            format!(
                "    + {:<STAT_WIDTH$}\t{:>width$}",
                key,
                val.bold().yellow(),
                width = STAT_WIDTH - 8
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}


fn loss_format(loss: Option<f64>) -> String {
    match loss {
        Some(loss) => format!("{:>WIDTH$.PREC_WIDTH$}", loss),
        None => format!("{:>WIDTH$}", "-"),
    }
}


fn time_format(millisec: u128) -> String {
    if millisec < 1_000 {
        return format!("  0.{:0>3}s", millisec);
    }
    let sec = millisec / 1_000;
    let millisec = millisec % 1_000;
    if sec < 60 {
        return format!(" {:0>2}.{:0>3}s", sec, millisec);
    }
    let min = sec / 60;
    let sec = sec % 60;
    if min < 60 {
        return format!(" {:0>2}m {:0>2}s", min, sec);
    }
    let hours = min / 60;
    let min = min % 60;
    format!(" {:0>2}h {:0>2}m", hours, min)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_is_formatted_by_magnitude() {
        assert_eq!(time_format(42), "  0.042s");
        assert_eq!(time_format(61_000), " 01m 01s");
        assert_eq!(time_format(3_600_000), " 01h 00m");
    }
}
