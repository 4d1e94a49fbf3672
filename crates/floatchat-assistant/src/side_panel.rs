// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::rules::{Matcher, Rule, RuleSet, Surface};

const TEMPERATURE: &str = "🌡️ **Temperature Analysis**: I found 127 active floats with recent temperature measurements. The North Atlantic shows a warming trend of +0.3°C over the past 6 months, while the Southern Ocean maintains stable temperatures around 4-8°C. Float #5906298 shows particularly interesting thermal layering at 500m depth. Would you like me to generate a detailed temperature profile comparison?";

const BGC: &str = "🔬 **BGC Float Analysis**: Currently tracking 43 biogeochemical floats globally. The Pacific BGC floats are showing elevated chlorophyll-a levels near the Kuroshio Current, indicating a phytoplankton bloom. Float #5906299 detected oxygen minimum zones between 200-800m depth. I can create a BGC parameter comparison chart if you'd like to explore further.";

const SALINITY: &str = "🧂 **Salinity Profile Comparison**: Analyzing salinity data across ocean basins. The Mediterranean outflow shows characteristic high-salinity water masses (>38 PSU) at intermediate depths, while the Arctic floats indicate freshening trends due to ice melt. Notable salinity anomalies detected in 3 floats - possibly indicating water mass mixing events.";

const EXPORT: &str = concat!(
    "📊 **Data Export Ready**: I can prepare your data in multiple formats:\n",
    "\n",
    "• **CSV**: Spreadsheet-compatible for analysis\n",
    "• **NetCDF**: Scientific standard with metadata\n",
    "• **ASCII**: Simple text format\n",
    "\n",
    "Which format would you prefer? I can also filter by date range, depth levels, or specific parameters (TEMP, PSAL, PRES, BGC).",
);

const TRAJECTORY: &str = "🛰️ **Trajectory Analysis**: The selected float has traveled 1,247 km over 45 days, following the Gulf Stream's northeastern path. Its movement pattern indicates it's caught in a mesoscale eddy, circulating clockwise at approximately 0.15 m/s. This trajectory is typical for floats in this region during winter months.";

const QUALITY: &str = "✅ **Quality Control Summary**: 94% of recent measurements pass quality checks. Detected 3 floats with questionable salinity spikes (likely sensor drift) and 1 float with temperature anomalies requiring manual review. Auto-flagged data includes pressure sensor outliers from Float #5906304. All BGC parameters show good data quality.";

const DEEP: &str = "🌊 **Deep Ocean Analysis**: Maximum profiling depth this month: 2,100m (Float #5906301). Deep measurements reveal stable abyssal temperatures of 2-4°C and consistent salinity values of 34.6-34.8 PSU. Detected interesting deep convection signatures in the Labrador Sea with temperatures reaching down to 1,800m depth.";

const FALLBACKS: [&str; 4] = [
    "🤖 I'm analyzing your query and cross-referencing with current ARGO data. Could you be more specific about which ocean region, parameter, or time period you're interested in?",
    "🌊 Based on the current dataset, I can help you explore ocean measurements from our global float network. What specific analysis would you like me to perform?",
    "📈 I have access to real-time and historical data from 4,000+ ARGO floats worldwide. Let me know what patterns or trends you'd like to investigate!",
    "🗺️ Our global float network is providing fascinating insights into ocean dynamics. Would you like to focus on a specific region, parameter, or research question?",
];

const GREETING: &str = "Welcome to Floatchat! I'm your AI assistant for exploring ARGO ocean data. I can help you analyze float trajectories, compare measurements, identify trends, and export data. What would you like to discover today?";

const SUGGESTED_QUERIES: [&str; 6] = [
    "Show me temperature trends in the North Atlantic",
    "Which BGC floats are active in the Pacific?",
    "Compare salinity profiles from different regions",
    "What's the deepest measurement this month?",
    "Export data for floats near the Gulf Stream",
    "Show me quality control issues",
];

const CONTEXTUAL_SUGGESTIONS: [&str; 6] = [
    "Analyze this float's trajectory pattern",
    "Compare with nearby floats",
    "Show temperature trend over time",
    "Export this float's data",
    "What's unusual about this measurement?",
    "Predict next profile location",
];

const RULE_TABLE: [Rule; 7] = [
    Rule::new(Matcher::Any(&["temperature"]), TEMPERATURE),
    Rule::new(Matcher::Any(&["bgc", "biogeochemical"]), BGC),
    Rule::new(Matcher::Any(&["salinity"]), SALINITY),
    Rule::new(Matcher::Any(&["export", "download"]), EXPORT),
    Rule::new(Matcher::Any(&["trajectory", "path"]), TRAJECTORY),
    Rule::new(Matcher::Any(&["quality", "qc"]), QUALITY),
    Rule::new(Matcher::Any(&["deep", "depth"]), DEEP),
];

pub(crate) const RULES: RuleSet = RuleSet {
    surface: Surface::SidePanel,
    rules: &RULE_TABLE,
    fallbacks: &FALLBACKS,
    greeting: GREETING,
    starter_queries: &SUGGESTED_QUERIES,
    greeting_suggestions: 3,
    follow_ups: &CONTEXTUAL_SUGGESTIONS,
    follow_up_count: 3,
    follow_up_threshold: 0.5,
    completions: &[],
};
