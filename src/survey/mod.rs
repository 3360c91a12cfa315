//! The page-by-page questionnaire flow: demographics once, then pages of
//! items, then scoring, persistence and rendering. A page cannot be advanced
//! until every item on it is answered; progress is saved after every page so
//! an interrupted run resumes where it stopped.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use crate::config::InventoryConfig;
use crate::demographics::{
    validate_profile, Profile, EDUCATION_LEVELS, GENDER_OPTIONS, MAX_AGE, MIN_AGE, REGIONS,
};
use crate::inventory::{AnswerScale, Item};
use crate::output;
use crate::scoring;
use crate::session::{save_session_state, SessionState};
use crate::store::{ParticipantRow, ResponseRow, ResultRow, StoreClient};

/// What the participant asked for at a page boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageAction {
    Next,
    Previous,
    Quit,
}

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout().flush().context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Parse an answer value against the active scale.
fn parse_answer(input: &str, scale: AnswerScale) -> Option<u8> {
    match input.parse::<u8>() {
        Ok(v) if scale.contains(v) => Some(v),
        _ => None,
    }
}

/// Number of pages needed for `total` items at `page_size` per page.
fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size)
}

/// The items shown on a zero-based page. Callers keep `page` in range.
fn page_slice(items: &[Item], page: usize, page_size: usize) -> &[Item] {
    let start = page * page_size;
    let end = (start + page_size).min(items.len());
    &items[start..end]
}

/// Prompt for one choice out of a fixed option list, looping until valid.
fn prompt_choice(label: &str, options: &[&str]) -> Result<String> {
    println!();
    println!("{}:", label);
    for (i, option) in options.iter().enumerate() {
        println!("  {}. {}", i + 1, option);
    }
    loop {
        let input = prompt(&format!("Choose 1-{}: ", options.len()))?;
        match input.parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => return Ok(options[n - 1].to_string()),
            _ => println!("  Invalid: enter a number between 1 and {}.", options.len()),
        }
    }
}

/// Collect the demographic profile interactively, one field at a time.
fn collect_profile() -> Result<Profile> {
    println!();
    println!("A few questions about you before the inventory starts.");

    let age: u32 = loop {
        let input = prompt(&format!("Age ({}-{}): ", MIN_AGE, MAX_AGE))?;
        match input.parse::<u32>() {
            Ok(v) if (MIN_AGE..=MAX_AGE).contains(&v) => break v,
            _ => println!("  Invalid: age must be between {} and {}.", MIN_AGE, MAX_AGE),
        }
    };

    let gender = prompt_choice("Gender", GENDER_OPTIONS)?;

    let region_names: Vec<&str> = REGIONS.iter().map(|(name, _)| *name).collect();
    let region = prompt_choice("Autonomous community", &region_names)?;

    let provinces = crate::demographics::provinces_of(&region)
        .expect("region came from the fixed table");
    let province = if provinces.len() == 1 {
        provinces[0].to_string()
    } else {
        prompt_choice("Province", provinces)?
    };

    // Every other field comes from a fixed list, so any validation error
    // here can only concern the locality.
    let locality = loop {
        let input = prompt("Locality: ")?;
        let candidate = Profile {
            age,
            gender: gender.clone(),
            region: region.clone(),
            province: province.clone(),
            locality: input.clone(),
            education: EDUCATION_LEVELS[0].to_string(),
        };
        match validate_profile(&candidate) {
            Ok(()) => break input,
            Err(errors) => {
                for error in &errors {
                    println!("  Invalid: {}", error);
                }
            }
        }
    };

    let education = prompt_choice("Education level", EDUCATION_LEVELS)?;

    let profile = Profile {
        age,
        gender,
        region,
        province,
        locality,
        education,
    };

    // Every field came from a validated prompt; this is the final gate.
    if let Err(errors) = validate_profile(&profile) {
        anyhow::bail!("Demographic validation failed: {}", errors.join("; "));
    }

    Ok(profile)
}

/// Present one item and record the answer. An already-answered item shows
/// its current value and keeps it on an empty input.
fn ask_item(item: &Item, scale: AnswerScale, state: &mut SessionState, use_colors: bool) -> Result<()> {
    println!();
    if use_colors {
        println!("{}", item.text.bold());
    } else {
        println!("{}", item.text);
    }
    for (i, label) in scale.labels().iter().enumerate() {
        println!("  {}. {}", i + 1, label);
    }

    let existing = state.answers.get(&item.id).copied();
    loop {
        let hint = match existing {
            Some(v) => format!("Answer 1-{} [current: {}]: ", scale.max(), v),
            None => format!("Answer 1-{}: ", scale.max()),
        };
        let input = prompt(&hint)?;

        if input.is_empty() {
            if existing.is_some() {
                return Ok(());
            }
            println!("  An answer is required.");
            continue;
        }

        match parse_answer(&input, scale) {
            Some(value) => {
                state.record_answer(item.id, value);
                return Ok(());
            }
            None => println!("  Invalid: enter a number between 1 and {}.", scale.max()),
        }
    }
}

/// Ask what to do after a completed page.
fn page_boundary_action(is_last: bool, page: usize) -> Result<PageAction> {
    let hint = if is_last {
        "[Enter] submit, b = previous page, q = save and quit: "
    } else {
        "[Enter] next page, b = previous page, q = save and quit: "
    };
    loop {
        let input = prompt(hint)?.to_lowercase();
        match input.as_str() {
            "" => return Ok(PageAction::Next),
            "b" if page > 0 => return Ok(PageAction::Previous),
            "b" => println!("  Already on the first page."),
            "q" => return Ok(PageAction::Quit),
            _ => println!("  Invalid: press Enter, b or q."),
        }
    }
}

/// Run the full questionnaire flow against a fetched item bank.
pub async fn run_survey(
    client: &StoreClient,
    items: &[Item],
    inventory: &InventoryConfig,
    state: &mut SessionState,
    session_path: &Path,
    verbose: bool,
) -> Result<()> {
    if items.is_empty() {
        anyhow::bail!("The item bank is empty. Seed the data service before running the questionnaire.");
    }

    let scale = AnswerScale::from_max(inventory.effective_scale())
        .expect("scale was validated at startup");
    let page_size = inventory.effective_page_size();
    let use_colors = output::should_use_colors();

    // Demographics are collected once and stored immediately so a
    // half-finished questionnaire still has its participant row.
    if state.profile.is_none() {
        let profile = collect_profile()?;
        let row = ParticipantRow::new(state.participant_id.clone(), &profile);
        client
            .upsert_participant(&row)
            .await
            .context("Failed to store demographic data")?;
        state.profile = Some(profile);
        save_session_state(session_path, state)?;
    } else if verbose {
        eprintln!("Demographics already recorded; resuming inventory");
    }

    let total_pages = page_count(items.len(), page_size);
    let mut page = state.page.min(total_pages - 1);

    loop {
        let page_items = page_slice(items, page, page_size);

        println!();
        let header = format!("Page {} of {}", page + 1, total_pages);
        if use_colors {
            println!("{}", header.bold());
        } else {
            println!("{}", header);
        }
        println!(
            "{}",
            output::format_progress(state.answers.len(), items.len(), use_colors)
        );

        for item in page_items {
            ask_item(item, scale, state, use_colors)?;
        }

        state.page = page;
        save_session_state(session_path, state)?;

        println!();
        let is_last = page + 1 == total_pages;
        match page_boundary_action(is_last, page)? {
            PageAction::Previous => {
                page -= 1;
                continue;
            }
            PageAction::Quit => {
                println!("Progress saved. Run `enneamind` again to resume.");
                return Ok(());
            }
            PageAction::Next if is_last => break,
            PageAction::Next => {
                page += 1;
                continue;
            }
        }
    }

    submit(client, items, scale, state, session_path, verbose).await
}

/// Validate, score, persist and render a completed response set.
async fn submit(
    client: &StoreClient,
    items: &[Item],
    scale: AnswerScale,
    state: &mut SessionState,
    session_path: &Path,
    verbose: bool,
) -> Result<()> {
    if let Err(errors) = scoring::validate_responses(&state.answers, items, scale) {
        eprintln!("The response set is not complete:");
        for error in &errors {
            eprintln!("  - {}", error);
        }
        anyhow::bail!("Submission refused: {} unresolved answers", errors.len());
    }

    let scores = scoring::accumulate(&state.answers, items)?;
    let outcome = scoring::resolve_dominant(&scores)?;

    if verbose {
        eprintln!(
            "Scored {} responses into {} categories",
            state.answers.len(),
            scores.len()
        );
    }

    let response_rows: Vec<ResponseRow> = state
        .answers
        .iter()
        .map(|(&item_id, &value)| ResponseRow {
            participant_id: state.participant_id.clone(),
            item_id,
            value,
        })
        .collect();
    client
        .insert_responses(&response_rows)
        .await
        .context("Failed to store responses")?;

    let result_row = ResultRow::new(
        state.participant_id.clone(),
        &outcome,
        &scores,
        state.elapsed_secs(),
    );
    client
        .upsert_result(&result_row)
        .await
        .context("Failed to store the result")?;

    state.clear_progress();
    save_session_state(session_path, state)?;

    let use_colors = output::should_use_colors();
    println!();
    println!("{}", output::format_outcome(&outcome, use_colors));
    println!();
    println!("{}", output::format_profile_chart(&scores, use_colors));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64) -> Item {
        Item {
            id,
            text: format!("Statement {}", id),
            category: ((id - 1) % 9 + 1) as u8,
            position: id as u32,
        }
    }

    #[test]
    fn test_parse_answer_range() {
        assert_eq!(parse_answer("1", AnswerScale::FourPoint), Some(1));
        assert_eq!(parse_answer("4", AnswerScale::FourPoint), Some(4));
        assert_eq!(parse_answer("5", AnswerScale::FourPoint), None);
        assert_eq!(parse_answer("5", AnswerScale::FivePoint), Some(5));
        assert_eq!(parse_answer("0", AnswerScale::FourPoint), None);
        assert_eq!(parse_answer("x", AnswerScale::FourPoint), None);
        assert_eq!(parse_answer("", AnswerScale::FourPoint), None);
    }

    #[test]
    fn test_page_count_rounds_up() {
        assert_eq!(page_count(36, 10), 4);
        assert_eq!(page_count(40, 10), 4);
        assert_eq!(page_count(41, 10), 5);
        assert_eq!(page_count(1, 10), 1);
    }

    #[test]
    fn test_page_slice_bounds() {
        let items: Vec<Item> = (1..=25).map(item).collect();

        assert_eq!(page_slice(&items, 0, 10).len(), 10);
        assert_eq!(page_slice(&items, 1, 10).len(), 10);
        // Last page is short.
        let last = page_slice(&items, 2, 10);
        assert_eq!(last.len(), 5);
        assert_eq!(last[0].id, 21);
    }
}
