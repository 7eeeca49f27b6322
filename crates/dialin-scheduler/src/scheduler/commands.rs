//! One-shot subcommands. Results go to `out`; logs go to stderr.

use std::io::Write;

use anyhow::{Context, bail};
use chrono::NaiveDate;
use dialin::{DateSource, Error, PhraseSupply, RandSource, SupplyReport};

pub fn check<R, C, W>(supply: &PhraseSupply<R, C>, json: bool, out: &mut W) -> anyhow::Result<()>
where
    R: RandSource<u64>,
    C: DateSource,
    W: Write,
{
    let report = supply.ensure_supply().context("supply check failed")?;
    if json {
        return write_json(out, &report);
    }

    if report.is_noop() {
        writeln!(
            out,
            "Supply sufficient: {} future phrases (minimum {})",
            report.future_before,
            supply.config().min_days_ahead
        )?;
    } else {
        write_added(out, &report)?;
    }
    Ok(())
}

pub fn generate<R, C, W>(
    supply: &PhraseSupply<R, C>,
    count: usize,
    json: bool,
    out: &mut W,
) -> anyhow::Result<()>
where
    R: RandSource<u64>,
    C: DateSource,
    W: Write,
{
    let report = supply.generate(count).context("generation failed")?;
    if json {
        return write_json(out, &report);
    }
    write_added(out, &report)
}

pub fn submit<R, C, W>(
    supply: &PhraseSupply<R, C>,
    phrase: &str,
    date: Option<NaiveDate>,
    json: bool,
    out: &mut W,
) -> anyhow::Result<()>
where
    R: RandSource<u64>,
    C: DateSource,
    W: Write,
{
    let record = match supply.submit(phrase, date) {
        Ok(record) => record,
        Err(Error::Rejected(reason)) => {
            if json {
                write_json(out, &reason)?;
            }
            bail!("phrase {phrase:?} rejected: {reason}");
        }
        Err(e) => return Err(e).context("submission failed"),
    };

    tracing::info!(%record, "Phrase submitted");
    if json {
        return write_json(out, &record);
    }
    writeln!(out, "Scheduled {record}")?;
    Ok(())
}

pub fn today<R, C, W>(
    supply: &PhraseSupply<R, C>,
    date: Option<NaiveDate>,
    json: bool,
    out: &mut W,
) -> anyhow::Result<()>
where
    R: RandSource<u64>,
    C: DateSource,
    W: Write,
{
    let date = date.unwrap_or_else(|| supply.today());
    let record = supply.phrase_for(date).context("ledger lookup failed")?;

    if json {
        write_json(out, &record)?;
    } else if let Some(record) = &record {
        writeln!(out, "{}", record.phrase)?;
    }

    if record.is_none() {
        bail!("no phrase scheduled for {}", date.format(dialin::DATE_FORMAT));
    }
    Ok(())
}

pub fn audit<R, C, W>(supply: &PhraseSupply<R, C>, json: bool, out: &mut W) -> anyhow::Result<()>
where
    R: RandSource<u64>,
    C: DateSource,
    W: Write,
{
    let report = supply.audit().context("ledger audit failed")?;
    if json {
        write_json(out, &report)?;
    } else {
        writeln!(out, "{} records", report.records)?;
        for line in &report.malformed {
            writeln!(out, "line {}: {}", line.line, line.reason)?;
        }
        for invalid in &report.invalid {
            writeln!(out, "invalid: {} ({})", invalid.record, invalid.reason)?;
        }
        for repeated in &report.repeated_phrases {
            let dates: Vec<String> = repeated.dates.iter().map(ToString::to_string).collect();
            writeln!(
                out,
                "repeated phrase {:?} on {}",
                repeated.phrase,
                dates.join(", ")
            )?;
        }
        for repeated in &report.repeated_dates {
            writeln!(
                out,
                "date {} has {} phrases: {}",
                repeated.date,
                repeated.phrases.len(),
                repeated.phrases.join(", ")
            )?;
        }
    }

    if !report.is_clean() {
        let problems = report.malformed.len()
            + report.invalid.len()
            + report.repeated_phrases.len()
            + report.repeated_dates.len();
        bail!("ledger audit found {problems} problems");
    }
    Ok(())
}

fn write_added<W: Write>(out: &mut W, report: &SupplyReport) -> anyhow::Result<()> {
    for record in &report.added {
        writeln!(out, "{record}")?;
    }
    writeln!(
        out,
        "Added {} of {} phrases; {} future phrases scheduled",
        report.added.len(),
        report.requested,
        report.future_after
    )?;
    Ok(())
}

fn write_json<W: Write, T: serde::Serialize + ?Sized>(out: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
