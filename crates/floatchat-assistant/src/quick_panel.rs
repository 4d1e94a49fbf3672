// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::rules::{Matcher, QuerySuggestion, Rule, RuleSet, Surface};

const TEMPERATURE_EQUATOR: &str = concat!(
    "🌊 **Temperature Analysis Near Equator**\n",
    "\n",
    "I found 47 ARGO floats with temperature data near the equatorial region. Here's what I discovered:\n",
    "\n",
    "• **Average surface temperature**: 28.3°C\n",
    "• **Temperature range**: 24.1°C to 29.8°C\n",
    "• **Depth analysis**: Thermocline typically found at 120-150m depth\n",
    "• **Seasonal pattern**: Higher temps in Mar-May\n",
    "\n",
    "*Tip: Try asking \"Show only depth > 200m\" to filter deeper measurements.*",
);

const BGC_ARABIAN: &str = concat!(
    "🧪 **BGC Parameters - Arabian Sea Analysis**\n",
    "\n",
    "Analyzing 23 BGC-enabled floats in the Arabian Sea over the last 6 months:\n",
    "\n",
    "• **Chlorophyll-a**: Peak bloom detected in February (avg: 2.4 mg/m³)\n",
    "• **Dissolved Oxygen**: Low oxygen zone confirmed at 200-800m depth\n",
    "• **Particulate Backscatter**: Elevated levels near coastal regions\n",
    "• **CDOM**: Higher absorption in northern Arabian Sea\n",
    "\n",
    "*Data quality: 91% passed QC checks*",
);

const NEAREST_LOCATION: &str = concat!(
    "📍 **Nearby ARGO Floats**\n",
    "\n",
    "Based on your current map view, I found these nearby active floats:\n",
    "\n",
    "• **Float #5906298**: 12.3 km away (Active, last profile: 2 days ago)\n",
    "• **Float #5906301**: 28.7 km away (Active, BGC-enabled)\n",
    "• **Float #5906299**: 45.1 km away (Active, deep profiles to 2000m)\n",
    "\n",
    "Click on any float marker on the map to see detailed profiles!",
);

const DEEP_FILTER: &str = concat!(
    "🔍 **Filtering by Depth > 200m**\n",
    "\n",
    "Applied depth filter based on your previous query context. Found:\n",
    "\n",
    "• **1,234 measurements** below 200m depth\n",
    "• **Temperature range**: 4.2°C to 18.7°C\n",
    "• **Salinity range**: 34.8 to 36.2 PSU\n",
    "• **Pressure range**: 20.3 to 203.1 dbar\n",
    "\n",
    "The data table and profiles have been updated to show only deep measurements.",
);

const FALLBACK: &str = concat!(
    "🤖 **AI Analysis Complete**\n",
    "\n",
    "I've processed your query: \"{query}\"\n",
    "\n",
    "• **Database search**: Found relevant ARGO float data\n",
    "• **Quality control**: Applied standard QC filters\n",
    "• **Geographic scope**: {float_count} floats identified\n",
    "• **Time range**: Latest available profiles\n",
    "\n",
    "*Try asking more specific questions about temperature, salinity, or BGC parameters for detailed insights!*",
);

const GREETING: &str = "Hello! I'm your AI assistant for exploring ARGO ocean data. Ask me anything about temperature profiles, salinity data, or help me find specific floats! Try asking something like 'Show me temperature profiles near the equator' or click on a suggestion below.";

const COMPLETIONS: [QuerySuggestion; 8] = [
    QuerySuggestion::example(
        "Show me salinity profiles near the equator in March 2023",
        "Spatial-Temporal",
    ),
    QuerySuggestion::example(
        "Compare BGC parameters in the Arabian Sea for the last 6 months",
        "Comparative",
    ),
    QuerySuggestion::example(
        "What are the nearest ARGO floats to this location?",
        "Proximity",
    ),
    QuerySuggestion::quick("temperature profiles", "Quick"),
    QuerySuggestion::quick("salinity data above 500m depth", "Quick"),
    QuerySuggestion::quick("BGC floats in Pacific Ocean", "Quick"),
    QuerySuggestion::quick("Show only depth > 200m", "Filter"),
    QuerySuggestion::quick("Export current data as CSV", "Action"),
];

const RULE_TABLE: [Rule; 4] = [
    Rule::new(Matcher::All(&["temperature", "equator"]), TEMPERATURE_EQUATOR),
    Rule::new(Matcher::All(&["bgc", "arabian"]), BGC_ARABIAN),
    Rule::new(Matcher::All(&["nearest", "location"]), NEAREST_LOCATION),
    Rule::new(Matcher::All(&["depth > 200"]), DEEP_FILTER),
];

pub(crate) const RULES: RuleSet = RuleSet {
    surface: Surface::QuickPanel,
    rules: &RULE_TABLE,
    fallbacks: &[FALLBACK],
    greeting: GREETING,
    starter_queries: &[],
    greeting_suggestions: 0,
    follow_ups: &[],
    follow_up_count: 0,
    follow_up_threshold: 1.0,
    completions: &COMPLETIONS,
};
