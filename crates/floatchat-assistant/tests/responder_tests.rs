// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use floatchat_assistant::{DelayRange, Responder, SeededSource, Surface};
use floatchat_testkit::ScriptedSource;
use std::time::Duration;

const EQUATOR_REPLY: &str = "🌊 **Temperature Analysis Near Equator**\n\nI found 47 ARGO floats with temperature data near the equatorial region. Here's what I discovered:\n\n• **Average surface temperature**: 28.3°C\n• **Temperature range**: 24.1°C to 29.8°C\n• **Depth analysis**: Thermocline typically found at 120-150m depth\n• **Seasonal pattern**: Higher temps in Mar-May\n\n*Tip: Try asking \"Show only depth > 200m\" to filter deeper measurements.*";

fn scripted(surface: Surface, draws: &[f64]) -> Responder {
    Responder::new(surface, Box::new(ScriptedSource::new(draws.iter().copied())))
}

#[test]
fn quick_panel_equator_template_is_exact() {
    let mut responder = scripted(Surface::QuickPanel, &[0.5]);
    let reply = responder.reply("Show me temperature profiles near the equator");
    assert_eq!(reply.content, EQUATOR_REPLY);
    assert!(reply.suggestions.is_empty());
}

#[test]
fn quick_panel_rules_need_every_keyword() {
    let mut responder = scripted(Surface::QuickPanel, &[0.0]);
    assert!(
        responder
            .reply("Compare BGC parameters in the Arabian Sea")
            .content
            .starts_with("🧪 **BGC Parameters - Arabian Sea Analysis**")
    );
    assert!(
        responder
            .reply("What are the nearest ARGO floats to this location?")
            .content
            .starts_with("📍 **Nearby ARGO Floats**")
    );
    assert!(
        responder
            .reply("Show only depth > 200m")
            .content
            .starts_with("🔍 **Filtering by Depth > 200m**")
    );
    // "temperature" alone is not enough on the quick panel.
    assert!(
        responder
            .reply("temperature profiles")
            .content
            .starts_with("🤖 **AI Analysis Complete**")
    );
}

#[test]
fn quick_panel_fallback_echoes_query_and_count() {
    let mut responder = scripted(Surface::QuickPanel, &[0.5]);
    let reply = responder.reply("what is up");
    assert!(reply.content.contains("I've processed your query: \"what is up\""));
    assert!(
        reply
            .content
            .contains("• **Geographic scope**: 150 floats identified")
    );

    let mut low = scripted(Surface::QuickPanel, &[0.0]);
    assert!(low.reply("x").content.contains("**Geographic scope**: 50 floats"));
    let mut high = scripted(Surface::QuickPanel, &[0.999]);
    assert!(high.reply("x").content.contains("**Geographic scope**: 249 floats"));
}

#[test]
fn assistant_page_temperature_wins_over_later_rules() {
    let mut responder = scripted(Surface::AssistantPage, &[0.0]);
    let reply = responder.reply("Export the TEMPERATURE and salinity data");
    assert!(
        reply
            .content
            .starts_with("🌡️ **Temperature Analysis Complete**")
    );
    assert!(reply.suggestions.is_empty(), "0.0 does not beat 0.3");
}

#[test]
fn assistant_page_keyword_groups() {
    let cases = [
        ("biogeochemical status", "🔬 **BGC Float Network Status**"),
        ("salinity please", "🧂 **Salinity Analysis Dashboard**"),
        ("download everything", "📊 **Data Export Center**"),
        ("show the path", "🛰️ **Float Trajectory Analysis**"),
        ("qc report", "✅ **Data Quality Control Report**"),
        ("how deep", "🌊 **Deep Ocean Exploration**"),
        ("o2 levels", "💨 **Oxygen Analysis Report**"),
        ("any anomaly?", "🔍 **Anomaly Detection Results**"),
    ];
    for (query, heading) in cases {
        let mut responder = scripted(Surface::AssistantPage, &[0.0]);
        let reply = responder.reply(query);
        assert!(reply.content.starts_with(heading), "query {query:?}");
    }
}

#[test]
fn assistant_page_fallback_and_follow_ups_follow_draws() {
    let mut responder = scripted(Surface::AssistantPage, &[0.0, 0.9]);
    let reply = responder.reply("hello");
    assert!(reply.content.starts_with("🤖 **AI Analysis Ready**"));
    assert_eq!(
        reply.suggestions,
        vec![
            "Analyze this float's trajectory pattern",
            "Compare with nearby floats",
            "Show temperature trend over time",
            "Export this float's data",
        ]
    );

    let mut responder = scripted(Surface::AssistantPage, &[0.99, 0.1]);
    let reply = responder.reply("hello");
    assert!(reply.content.starts_with("📈 **Floatchat Intelligence Engine**"));
    assert!(reply.suggestions.is_empty());
}

#[test]
fn side_panel_uses_short_templates() {
    let mut responder = scripted(Surface::SidePanel, &[0.5]);
    let reply = responder.reply("temperature");
    assert!(
        reply
            .content
            .starts_with("🌡️ **Temperature Analysis**: I found 127 active floats")
    );
    assert!(reply.suggestions.is_empty(), "0.5 does not beat 0.5");

    let mut responder = scripted(Surface::SidePanel, &[0.75, 0.51]);
    let reply = responder.reply("oxygen");
    assert!(
        reply
            .content
            .starts_with("🗺️ Our global float network")
    );
    assert_eq!(reply.suggestions.len(), 3);
}

#[test]
fn every_input_gets_a_reply() {
    for surface in Surface::ALL {
        let mut responder = Responder::new(surface, Box::new(SeededSource::seeded(3)));
        for query in ["", "   ", "ÄÖÜ", "?", "temperature", "zzzz", "{query}"] {
            assert!(!responder.reply(query).content.is_empty());
        }
    }
}

#[test]
fn greetings_carry_starter_queries() {
    let page = scripted(Surface::AssistantPage, &[0.0]).greeting();
    assert!(page.content.starts_with("🌊 **Welcome to Floatchat AI!**"));
    assert_eq!(page.suggestions.len(), 4);

    let side = scripted(Surface::SidePanel, &[0.0]).greeting();
    assert!(side.content.starts_with("Welcome to Floatchat!"));
    assert_eq!(side.suggestions.len(), 3);

    let quick = scripted(Surface::QuickPanel, &[0.0]).greeting();
    assert!(quick.content.starts_with("Hello! I'm your AI assistant"));
    assert!(quick.suggestions.is_empty());
}

#[test]
fn completions_filter_and_cap() {
    let quick = scripted(Surface::QuickPanel, &[0.0]);
    assert_eq!(quick.suggest_completions("").len(), 3);
    assert_eq!(
        quick.suggest_completions("DEPTH"),
        vec!["salinity data above 500m depth", "Show only depth > 200m"]
    );
    assert!(quick.suggest_completions("e").len() <= 6);
    assert!(quick.suggest_completions("nothing like this").is_empty());

    let page = scripted(Surface::AssistantPage, &[0.0]);
    assert_eq!(page.suggest_completions("").len(), 4);
    assert_eq!(
        page.suggest_completions("oxygen"),
        vec!["Analyze oxygen levels in the Southern Ocean"]
    );
}

#[test]
fn delay_draws_from_range() {
    let mut responder = scripted(Surface::QuickPanel, &[0.25]);
    assert_eq!(
        responder.delay(DelayRange::default()),
        Duration::from_millis(1750)
    );
}
