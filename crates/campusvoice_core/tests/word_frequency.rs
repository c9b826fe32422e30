use campusvoice_core::analytics::words::MAX_WORDS;
use campusvoice_core::{analyze_words, parse_timestamp, Feedback, Rating, SentimentBucket};
use uuid::Uuid;

fn feedback_with(comment: &str, sentiment: f64) -> Feedback {
    Feedback {
        id: Uuid::now_v7(),
        event_id: "event3".to_string(),
        rating: Rating::new(3).unwrap(),
        comment: comment.to_string(),
        sentiment_score: sentiment,
        created_at: parse_timestamp("2025-11-02T18:45:00Z").unwrap(),
        is_anonymous: true,
        author: None,
    }
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn empty_input_yields_no_words() {
    assert!(analyze_words(&[]).is_empty());
}

#[test]
fn empty_comments_and_stop_words_yield_no_words() {
    let feedback = vec![
        feedback_with("", 0.5),
        feedback_with("It is as it was, and we did it.", 0.0),
        feedback_with("Up to us! OK?", -0.5),
    ];
    assert!(analyze_words(&feedback).is_empty());
}

#[test]
fn repeated_word_counts_every_occurrence_with_parent_sentiment() {
    let words = analyze_words(&[feedback_with("great great great", 0.8)]);
    assert_eq!(words.len(), 1);
    assert_eq!(words[0].text, "great");
    assert_eq!(words[0].count, 3);
    assert_close(words[0].mean_sentiment, 0.8);
    assert_close(words[0].relative_weight, 1.0);
}

#[test]
fn mean_sentiment_weights_by_occurrence_across_comments() {
    let feedback = vec![
        feedback_with("venue venue", 1.0),
        feedback_with("The venue was crowded", -0.5),
    ];
    let words = analyze_words(&feedback);
    let venue = words.iter().find(|word| word.text == "venue").unwrap();
    assert_eq!(venue.count, 3);
    assert_close(venue.mean_sentiment, 0.5);
    assert_eq!(venue.tone(), SentimentBucket::Positive);

    let crowded = words.iter().find(|word| word.text == "crowded").unwrap();
    assert_eq!(crowded.count, 1);
    assert_eq!(crowded.tone(), SentimentBucket::Negative);
}

#[test]
fn results_sort_by_count_and_keep_first_seen_order_on_ties() {
    let words = analyze_words(&[feedback_with(
        "music food music stage food music",
        0.0,
    )]);
    let ordered: Vec<(&str, usize)> = words
        .iter()
        .map(|word| (word.text.as_str(), word.count))
        .collect();
    assert_eq!(ordered, vec![("music", 3), ("food", 2), ("stage", 1)]);
}

#[test]
fn relative_weight_scales_against_top_word() {
    let words = analyze_words(&[feedback_with(
        "talk talk talk talk panel panel booth",
        0.0,
    )]);
    assert_close(words[0].relative_weight, 1.0);
    assert_close(words[1].relative_weight, 0.5);
    assert_close(words[2].relative_weight, 0.25);
    assert!(words[0].is_emphasized());
    assert!(!words[1].is_emphasized());
}

#[test]
fn output_is_capped_at_thirty_five_words() {
    let comment = (0..50)
        .map(|index| format!("word{index:02}"))
        .collect::<Vec<_>>()
        .join(" ");
    let words = analyze_words(&[feedback_with(&comment, 0.0)]);
    assert_eq!(words.len(), MAX_WORDS);
    assert_eq!(words[0].text, "word00");
    assert_eq!(words[MAX_WORDS - 1].text, "word34");
}

#[test]
fn punctuation_is_stripped_before_length_filter() {
    let words = analyze_words(&[feedback_with("Fun!!! ok... A+ wow-wow", 0.2)]);
    let texts: Vec<&str> = words.iter().map(|word| word.text.as_str()).collect();
    assert_eq!(texts, vec!["fun", "wowwow"]);
}
