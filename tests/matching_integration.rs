use visual_scraper::{MatchStatus, PickStatus, PickedElement, ScrapeSession, ScraperOptions};

const SHOP: &str = r#"<html><body>
    <div id="listing">
        <article class="product">
            <h2 class="name">Kettle</h2>
            <span class="price">$20</span>
            <a class="more" href="/p/kettle">Details</a>
        </article>
        <article class="product featured">
            <h2 class="name">Toaster</h2>
            <span class="price sale">$35</span>
            <a class="more" href="/p/toaster">Details</a>
        </article>
        <article class="product">
            <h2 class="name">Blender</h2>
            <span class="price">$50</span>
            <a class="more" href="/p/blender">Details</a>
        </article>
    </div>
    <footer><p class="name">Contact</p></footer>
</body></html>"#;

fn shop() -> ScrapeSession {
    let mut session = ScrapeSession::new(ScraperOptions::default());
    session.load_html(SHOP, Some("https://shop.example/catalog")).unwrap();
    session
}

fn texts(session: &ScrapeSession) -> Vec<&str> {
    session.selections().iter().map(|e| e.text.as_str()).collect()
}

#[test]
fn test_match_collects_similar_elements() {
    let mut session = shop();
    session.pick_path("div#listing > article > h2").unwrap();
    session.pick_path("div#listing > article > span").unwrap();

    let report = session.run_match(0.67).unwrap();

    assert_eq!(report.status, MatchStatus::Added);
    assert_eq!(report.added, 4);
    // "$35" shares only half its classes with the price example
    assert_eq!(
        texts(&session),
        vec!["Kettle", "$20", "Toaster", "Blender", "$50", "Contact"]
    );

    // The footer paragraph matches on class alone
    let contact = report.results.iter().find(|r| r.candidate.text == "Contact").unwrap();
    assert_eq!(contact.structural_similarity, 0.0);
    assert_eq!(contact.class_similarity, 1.0);
}

#[test]
fn test_lower_threshold_picks_up_partial_class_overlap() {
    let mut session = shop();
    session.pick_path("div#listing > article > h2").unwrap();
    session.pick_path("div#listing > article > span").unwrap();
    session.run_match(0.67).unwrap();

    let report = session.run_match(0.5).unwrap();

    assert_eq!(report.added, 1);
    let sale = report.results.iter().find(|r| r.candidate.text == "$35").unwrap();
    assert_eq!(sale.class_similarity, 0.5);
    assert_eq!(sale.total_similarity, 0.5);
    assert!((sale.structural_similarity - 1.0 / 3.0).abs() < 1e-9);
    assert_eq!(session.selections().last().unwrap().text, "$35");
}

#[test]
fn test_results_are_ranked_best_first() {
    let mut session = shop();
    session.pick_path("div#listing > article > span").unwrap();

    let report = session.run_match(0.5).unwrap();
    let totals: Vec<f64> = report.results.iter().map(|r| r.total_similarity).collect();

    assert!(totals.windows(2).all(|pair| pair[0] >= pair[1]));
    assert_eq!(report.results.last().unwrap().candidate.text, "$35");
}

#[test]
fn test_matches_with_already_shown_text_are_skipped() {
    let mut session = shop();
    let outcome = session.pick_path("div#listing > article > a").unwrap();
    assert_eq!(outcome.element.unwrap().href, "https://shop.example/p/kettle");

    // Every other link reads "Details" too, so none of them is ingested
    let report = session.run_match(0.67).unwrap();
    assert_eq!(report.results.len(), 3);
    assert_eq!(report.added, 0);
    assert_eq!(report.status, MatchStatus::NoNewMatches);
    assert_eq!(report.message, "No new matching elements found");

    // A direct pick bypasses the text check
    let outcome = session.pick_path("div#listing > article:nth-of-type(2) > a").unwrap();
    assert_eq!(outcome.status, PickStatus::Added);
    assert_eq!(session.selections().len(), 2);
}

#[test]
fn test_threshold_is_inclusive() {
    let page = "<html><body>\
        <div><ul><li>Alpha</li><li>Beta</li></ul></div>\
        <div><ul><li>Gamma</li></ul></div>\
        </body></html>";

    let mut strict = ScrapeSession::default();
    strict.load_html(page, None).unwrap();
    strict.pick_path("html > body > div > ul > li").unwrap();
    assert_eq!(strict.run_match(0.5).unwrap().added, 0);

    // Two of five segments shared from the end
    let mut loose = ScrapeSession::default();
    loose.load_html(page, None).unwrap();
    loose.pick_path("html > body > div > ul > li").unwrap();
    let report = loose.run_match(0.4).unwrap();
    assert_eq!(report.added, 1);
    assert_eq!(texts(&loose), vec!["Alpha", "Gamma"]);
}

#[test]
fn test_truncated_text_dedup_on_ingestion() {
    let prefix = "x".repeat(50);
    let page = format!(
        r#"<html><body><p class="note">{}one</p><p class="note">{}two</p></body></html>"#,
        prefix, prefix
    );

    let mut session = ScrapeSession::default();
    session.load_html(&page, None).unwrap();
    session.pick_path("html > body > p").unwrap();

    let report = session.run_match(0.67).unwrap();
    assert_eq!(report.results.len(), 2);
    assert_eq!(report.added, 0);
}

#[test]
fn test_capture_events_are_processed_in_order() {
    let mut session = ScrapeSession::default();

    for (text, selector) in [("First", "ul > li"), ("", "ul > li:nth-of-type(2)"), ("First", "ul > li")] {
        let sent = session.capture().pick(PickedElement {
            text: text.to_string(),
            selector: selector.to_string(),
            ..Default::default()
        });
        assert!(sent);
    }

    let statuses: Vec<PickStatus> = session.process_events().into_iter().map(|o| o.status).collect();
    assert_eq!(
        statuses,
        vec![PickStatus::Added, PickStatus::EmptyText, PickStatus::Duplicate]
    );

    session.set_selection_mode(false);
    assert!(!session.capture().pick(PickedElement {
        text: "Later".to_string(),
        selector: "p".to_string(),
        ..Default::default()
    }));
    assert!(session.process_events().is_empty());
}

#[test]
fn test_export_round_trip_through_files() {
    let mut session = shop();
    session.pick_path("div#listing > article > a").unwrap();
    session.pick_path("div#listing > article > h2").unwrap();

    let dir = tempfile::tempdir().unwrap();

    let csv_path = dir.path().join("rows.csv");
    assert_eq!(session.export_to(&csv_path).unwrap(), 2);
    let bytes = std::fs::read(&csv_path).unwrap();
    assert!(bytes.starts_with(b"\xEF\xBB\xBF"));
    let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "text,selector,href",
            "Details,div#listing > article > a,https://shop.example/p/kettle",
            "Kettle,div#listing > article > h2,",
        ]
    );

    let json_path = dir.path().join("rows.json");
    session.export_to(&json_path).unwrap();
    let rows: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(rows[1]["text"], "Kettle");
    assert_eq!(rows[0]["href"], "https://shop.example/p/kettle");
}
