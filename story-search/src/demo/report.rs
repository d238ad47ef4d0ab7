//! Plain-text report output for the demonstration binaries.

use story_search_shared::{SearchHit, TermBucket};

/// Width of the separator rules.
pub const SEPARATOR_WIDTH: usize = 70;

/// Maximum characters of story text shown per hit.
pub const MAX_TEXT_PREVIEW: usize = 100;

/// Print the opening banner.
pub fn print_banner() {
    println!();
    println!("{}", "=".repeat(SEPARATOR_WIDTH));
    println!("  STORY SEARCH - demonstration of the search service wrapper");
    println!("{}", "=".repeat(SEPARATOR_WIDTH));
}

/// Print a titled section separator.
pub fn print_separator(title: &str) {
    println!();
    println!("{}", "=".repeat(SEPARATOR_WIDTH));
    if !title.is_empty() {
        println!("  {}", title);
        println!("{}", "=".repeat(SEPARATOR_WIDTH));
    }
    println!();
}

/// Print a list of search hits in a readable form.
pub fn print_hits(hits: &[SearchHit], title: &str) {
    println!("\n{}:", title);
    println!("{}", "-".repeat(SEPARATOR_WIDTH));

    if hits.is_empty() {
        println!("  no results");
        return;
    }

    for (i, hit) in hits.iter().enumerate() {
        println!("\n{}. id: {}", i + 1, hit.id);
        if let Some(score) = hit.score {
            println!("   score:  {:.2}", score);
        }
        println!(
            "   author: {}",
            hit.source.author.as_deref().unwrap_or("n/a")
        );
        println!(
            "   type:   {}",
            hit.source.document_type.as_deref().unwrap_or("n/a")
        );
        if let Some(date) = hit.source.date {
            println!("   date:   {}", date);
        }
        if let Some(preview) = hit.source.text_preview(MAX_TEXT_PREVIEW) {
            println!("   text:   {}", preview);
        }
    }
}

/// Print aggregation buckets as a count table.
pub fn print_buckets(buckets: &[TermBucket]) {
    println!("{}", "-".repeat(SEPARATOR_WIDTH));
    for bucket in buckets {
        println!("  - {}: {} documents", bucket.key, bucket.doc_count);
    }
}

/// Print aggregation buckets with percentage bars relative to `total`.
pub fn print_bucket_bars(buckets: &[TermBucket], total: u64) {
    println!("{}", "-".repeat(40));
    for bucket in buckets {
        let percentage = if total > 0 {
            bucket.doc_count as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        let bar = "█".repeat((percentage / 5.0) as usize);
        println!(
            "{:<15} {} {:>2} ({:.1}%)",
            bucket.key, bar, bucket.doc_count, percentage
        );
    }
}
