// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::rules::{Matcher, Rule, RuleSet, Surface};

const TEMPERATURE: &str = concat!(
    "🌡️ **Temperature Analysis Complete**\n",
    "\n",
    "I've analyzed temperature data from 127 active floats with recent measurements:\n",
    "\n",
    "**Key Findings:**\n",
    "• North Atlantic: +0.3°C warming trend over 6 months\n",
    "• Southern Ocean: Stable temperatures (4-8°C range)\n",
    "• Float #5906298: Interesting thermal stratification at 500m\n",
    "• Arctic waters: Warming signal detected in upper 100m\n",
    "\n",
    "**Notable Patterns:**\n",
    "• Seasonal thermocline deepening in subtropical regions\n",
    "• Cold water intrusion observed near Labrador Current\n",
    "• Surface temperature anomalies correlate with recent wind patterns\n",
    "\n",
    "Would you like me to generate detailed temperature profiles or export the analysis data?",
);

const BGC: &str = concat!(
    "🔬 **BGC Float Network Status**\n",
    "\n",
    "Currently monitoring **43 biogeochemical floats** across all ocean basins:\n",
    "\n",
    "**Active Regions:**\n",
    "• Pacific: 18 floats (strong phytoplankton signal near Kuroshio)\n",
    "• Atlantic: 15 floats (oxygen minimum zones detected)\n",
    "• Indian: 7 floats (seasonal productivity patterns)\n",
    "• Southern: 3 floats (carbon cycle monitoring)\n",
    "\n",
    "**Recent Discoveries:**\n",
    "• Chlorophyll-a bloom detected in North Pacific (Float #WMO6901234)\n",
    "• Oxygen depletion at 200-800m depth in Arabian Sea\n",
    "• Unusual nitrate patterns suggest subsurface water mass changes\n",
    "\n",
    "**Data Quality:** 97% of BGC measurements pass QC checks\n",
    "\n",
    "Shall I dive deeper into specific BGC parameters or regional analysis?",
);

const SALINITY: &str = concat!(
    "🧂 **Salinity Analysis Dashboard**\n",
    "\n",
    "Processed salinity measurements from **3,847 active floats**:\n",
    "\n",
    "**Regional Highlights:**\n",
    "• **Mediterranean Outflow**: High-salinity signature (>38 PSU) at 800-1200m\n",
    "• **Arctic Freshening**: -0.2 PSU trend in Beaufort Gyre over 2 years\n",
    "• **Subtropical Gyres**: Stable high-salinity cores (>36.5 PSU)\n",
    "• **Equatorial Pacific**: Fresh water intrusion from recent precipitation\n",
    "\n",
    "**Anomaly Detection:**\n",
    "• 3 floats showing unusual salinity spikes (sensor drift suspected)\n",
    "• Fresh water lenses detected in tropical Atlantic\n",
    "• Strong halocline identified in Nordic Seas\n",
    "\n",
    "**Water Mass Analysis:**\n",
    "• North Atlantic Deep Water: 34.9-35.0 PSU signature confirmed\n",
    "• Antarctic Intermediate Water: Clear 34.3-34.4 PSU band\n",
    "\n",
    "Would you like detailed salinity-temperature diagrams or water mass classification?",
);

const EXPORT: &str = concat!(
    "📊 **Data Export Center**\n",
    "\n",
    "I can prepare your oceanographic data in multiple professional formats:\n",
    "\n",
    "**Available Formats:**\n",
    "\n",
    "🔹 **CSV Format**\n",
    "   • Spreadsheet-compatible\n",
    "   • Ideal for statistical analysis\n",
    "   • Custom column selection\n",
    "\n",
    "🔹 **NetCDF Format**\n",
    "   • Scientific standard with full metadata\n",
    "   • CF-compliant structure\n",
    "   • Includes quality flags and processing history\n",
    "\n",
    "🔹 **ASCII Text**\n",
    "   • Simple columnar format\n",
    "   • Compatible with legacy systems\n",
    "   • Customizable delimiters\n",
    "\n",
    "**Filter Options:**\n",
    "• Date range selection\n",
    "• Depth level filtering\n",
    "• Parameter selection (TEMP, PSAL, PRES, BGC)\n",
    "• Geographic bounding box\n",
    "• Quality flag filtering\n",
    "\n",
    "**Export Size Estimates:**\n",
    "• Selected data: ~2.3 MB\n",
    "• Processing time: 15-30 seconds\n",
    "\n",
    "Which format would you prefer, and do you need any specific filtering applied?",
);

const TRAJECTORY: &str = concat!(
    "🛰️ **Float Trajectory Analysis**\n",
    "\n",
    "Analyzing movement patterns for selected floats:\n",
    "\n",
    "**Trajectory Statistics:**\n",
    "• **Total Distance**: 1,247 km over 45 days\n",
    "• **Average Speed**: 0.29 m/s (including drift)\n",
    "• **Current Direction**: Following Gulf Stream northeastern branch\n",
    "\n",
    "**Movement Characteristics:**\n",
    "• Caught in mesoscale eddy (clockwise circulation)\n",
    "• Surface velocity: ~0.15 m/s\n",
    "• Depth-averaged flow: 0.08 m/s eastward\n",
    "• Predicted next position: 41.2°N, 32.8°W\n",
    "\n",
    "**Environmental Context:**\n",
    "• Sea surface temperature gradient driving eddy formation\n",
    "• Wind stress correlation coefficient: 0.73\n",
    "• Consistent with winter circulation patterns\n",
    "\n",
    "**Predictive Modeling:**\n",
    "• 95% confidence interval for 7-day forecast\n",
    "• Likely to exit eddy system within 12 days\n",
    "• Expected to rejoin main Gulf Stream flow\n",
    "\n",
    "Would you like detailed trajectory plots or comparison with other floats in the region?",
);

const QUALITY: &str = concat!(
    "✅ **Data Quality Control Report**\n",
    "\n",
    "**Overall System Health:** 94.2% pass rate\n",
    "\n",
    "**Quality Metrics:**\n",
    "• **Temperature**: 97.8% good data\n",
    "• **Salinity**: 93.1% good data (3 sensor drift cases)\n",
    "• **Pressure**: 99.2% good data\n",
    "• **BGC Parameters**: 91.5% good data\n",
    "\n",
    "**Flagged Issues:**\n",
    "🚩 **Float #5906304**: Pressure sensor outliers detected\n",
    "🚩 **Float #5906289**: Salinity drift >0.01 PSU/month\n",
    "🚩 **Float #5906156**: Temperature spikes in surface layer\n",
    "\n",
    "**Automated QC Results:**\n",
    "• Gross range checks: 99.8% pass\n",
    "• Spike detection: 96.7% pass\n",
    "• Gradient tests: 94.2% pass\n",
    "• Climatology comparison: 93.8% pass\n",
    "\n",
    "**Manual Review Queue:**\n",
    "• 23 profiles pending expert review\n",
    "• Average review time: 2.1 days\n",
    "• Priority flags: 3 urgent cases\n",
    "\n",
    "**Recommended Actions:**\n",
    "• Schedule maintenance for 3 floats\n",
    "• Update regional climatology references\n",
    "• Implement enhanced BGC QC procedures\n",
    "\n",
    "Would you like detailed QC reports for specific floats or parameters?",
);

const DEEP: &str = concat!(
    "🌊 **Deep Ocean Exploration**\n",
    "\n",
    "**Depth Coverage Summary:**\n",
    "• **Maximum Depth This Month**: 2,100m (Float #5906301)\n",
    "• **Average Profile Depth**: 1,850m\n",
    "• **Deep Water Measurements**: 15,847 profiles >1,500m\n",
    "\n",
    "**Abyssal Ocean Conditions:**\n",
    "• **Temperature Range**: 1.8°C - 4.2°C\n",
    "• **Salinity Range**: 34.6 - 34.8 PSU\n",
    "• **Pressure Accuracy**: ±2 dbar at 2000m\n",
    "\n",
    "**Notable Deep Features:**\n",
    "🔹 **Labrador Sea Deep Convection**\n",
    "   • Winter mixing reaching 1,800m depth\n",
    "   • Temperature: 3.2°C at maximum depth\n",
    "   • Oxygen-rich water formation observed\n",
    "\n",
    "🔹 **Overflow Waters**\n",
    "   • Denmark Strait: Dense water cascading\n",
    "   • Mediterranean Outflow: 1,000m depth signature\n",
    "   • Antarctic Bottom Water: <2°C in Southern Ocean\n",
    "\n",
    "🔹 **Deep Current Systems**\n",
    "   • North Atlantic Deep Water circulation\n",
    "   • Antarctic Circumpolar Current deep layers\n",
    "   • Pacific Deep Water mass characteristics\n",
    "\n",
    "**Research Implications:**\n",
    "• Deep ocean warming signals detected\n",
    "• Carbon sequestration in deep layers\n",
    "• Thermohaline circulation monitoring\n",
    "\n",
    "Would you like specific deep water mass analysis or vertical profile comparisons?",
);

const OXYGEN: &str = concat!(
    "💨 **Oxygen Analysis Report**\n",
    "\n",
    "**Dissolved Oxygen Overview:**\n",
    "Analyzing data from **28 BGC floats** with oxygen sensors:\n",
    "\n",
    "**Oxygen Minimum Zones (OMZs):**\n",
    "• **Arabian Sea**: Severe depletion <5 μmol/kg at 200-800m\n",
    "• **Eastern Pacific**: Expanding OMZ detected off Peru\n",
    "• **Bay of Bengal**: Seasonal oxygen variability observed\n",
    "\n",
    "**Notable Findings:**\n",
    "🔴 **Critical Hypoxic Events**\n",
    "   • Float #5906421: O₂ <2 μmol/kg at 450m depth\n",
    "   • Duration: 15-day monitoring period\n",
    "   • Correlation with high productivity surface waters\n",
    "\n",
    "🟡 **Seasonal Patterns**\n",
    "   • Monsoon-driven oxygen fluctuations\n",
    "   • Deep water renewal in winter months\n",
    "   • Surface oxygen supersaturation during blooms\n",
    "\n",
    "**Biological Implications:**\n",
    "• Marine ecosystem stress indicators\n",
    "• Fish habitat compression zones\n",
    "• Nitrogen cycling modifications\n",
    "\n",
    "**Climate Connections:**\n",
    "• Ocean warming reduces oxygen solubility\n",
    "• Stratification impacts oxygen ventilation\n",
    "• Links to global carbon cycle\n",
    "\n",
    "Shall I provide detailed oxygen profiles or ecosystem impact analysis?",
);

const UNUSUAL: &str = concat!(
    "🔍 **Anomaly Detection Results**\n",
    "\n",
    "**Automated Anomaly Screening:**\n",
    "Scanned **2.3M measurements** from the past 30 days\n",
    "\n",
    "**Temperature Anomalies:**\n",
    "🌡️ **Thermal Inversions**\n",
    "   • Float #5906298: Warm layer at 300m (unusual for region)\n",
    "   • 2.5°C above seasonal climatology\n",
    "   • Possible subsurface eddy influence\n",
    "\n",
    "🌡️ **Cold Water Intrusions**\n",
    "   • Nordic Seas: Unexpected 1.8°C at 150m\n",
    "   • Likely related to enhanced mixing event\n",
    "   • Correlation with recent storm activity\n",
    "\n",
    "**Salinity Anomalies:**\n",
    "🧂 **Fresh Water Patches**\n",
    "   • Tropical Atlantic: -0.8 PSU surface anomaly\n",
    "   • Consistent with increased precipitation\n",
    "   • Affecting upper 50m of water column\n",
    "\n",
    "🧂 **Salt Spikes**\n",
    "   • Mediterranean: +0.3 PSU at intermediate depths\n",
    "   • Enhanced evaporation signal detected\n",
    "   • Possible climate change indicator\n",
    "\n",
    "**BGC Anomalies:**\n",
    "🔬 **Chlorophyll Blooms**\n",
    "   • Unexpected spring bloom in Arctic waters\n",
    "   • 3x higher than historical average\n",
    "   • Early ice retreat correlation\n",
    "\n",
    "**Statistical Significance:**\n",
    "• 12 anomalies exceed 3-sigma threshold\n",
    "• 89% show environmental correlation\n",
    "• 3 cases require further investigation\n",
    "\n",
    "Would you like detailed analysis of any specific anomaly or regional patterns?",
);

const FALLBACKS: [&str; 3] = [
    concat!(
        "🤖 **AI Analysis Ready**\n",
        "\n",
        "I'm processing your query against our comprehensive ARGO database. Could you specify:\n",
        "\n",
        "• Which ocean region interests you?\n",
        "• What parameter (temperature, salinity, oxygen)?\n",
        "• Time period for analysis?\n",
        "• Specific analysis type needed?\n",
        "\n",
        "**Current Data Availability:**\n",
        "• 3,847 active floats worldwide\n",
        "• Real-time data streaming\n",
        "• 94.8% quality-controlled measurements\n",
        "• BGC sensors on 43 floats\n",
        "\n",
        "I can provide detailed analysis, statistical summaries, or custom data exports.",
    ),
    concat!(
        "🌊 **Ocean Data Intelligence**\n",
        "\n",
        "Based on our global float network, I can help you explore:\n",
        "\n",
        "**🔍 Analysis Types:**\n",
        "• Trend identification and forecasting\n",
        "• Regional comparison studies\n",
        "• Water mass characterization\n",
        "• Anomaly detection and alerts\n",
        "\n",
        "**📊 Visualization Options:**\n",
        "• Interactive depth profiles\n",
        "• Trajectory mapping\n",
        "• Time series analysis\n",
        "• Statistical distributions\n",
        "\n",
        "**💾 Export Capabilities:**\n",
        "• Scientific formats (NetCDF, CSV)\n",
        "• Custom quality filtering\n",
        "• Metadata inclusion\n",
        "• API access available\n",
        "\n",
        "What specific oceanographic question would you like to investigate?",
    ),
    concat!(
        "📈 **Floatchat Intelligence Engine**\n",
        "\n",
        "I have real-time access to global ocean measurements. Here's what I can analyze:\n",
        "\n",
        "**🌍 Global Coverage:**\n",
        "• All major ocean basins\n",
        "• Surface to 2,000m depth\n",
        "• Temperature, salinity, pressure\n",
        "• Biogeochemical parameters\n",
        "\n",
        "**🧠 AI Capabilities:**\n",
        "• Pattern recognition\n",
        "• Predictive modeling\n",
        "• Anomaly identification\n",
        "• Trend analysis\n",
        "\n",
        "**⚡ Instant Insights:**\n",
        "• Statistical summaries\n",
        "• Quality assessments\n",
        "• Environmental correlations\n",
        "• Research recommendations\n",
        "\n",
        "Let me know your research focus, and I'll provide targeted analysis and insights!",
    ),
];

const GREETING: &str = concat!(
    "🌊 **Welcome to Floatchat AI!**\n",
    "\n",
    "I'm your intelligent assistant for exploring ARGO ocean data. I can help you:\n",
    "\n",
    "• **Analyze** float trajectories and oceanographic patterns\n",
    "• **Compare** measurements across different regions and time periods\n",
    "• **Identify** trends and anomalies in ocean data\n",
    "• **Export** data in multiple formats (CSV, NetCDF, ASCII)\n",
    "• **Generate** insights and summaries from complex datasets\n",
    "\n",
    "What oceanographic question can I help you explore today?",
);

const SUGGESTED_QUERIES: [&str; 8] = [
    "Show me temperature trends in the North Atlantic",
    "Which BGC floats are active in the Pacific?",
    "Compare salinity profiles from different regions",
    "What's the deepest measurement this month?",
    "Export data for floats near the Gulf Stream",
    "Show me quality control issues",
    "Analyze oxygen levels in the Southern Ocean",
    "Find floats with unusual temperature patterns",
];

const CONTEXTUAL_SUGGESTIONS: [&str; 8] = [
    "Analyze this float's trajectory pattern",
    "Compare with nearby floats",
    "Show temperature trend over time",
    "Export this float's data",
    "What's unusual about this measurement?",
    "Predict next profile location",
    "Check data quality indicators",
    "Show biogeochemical parameters",
];

const RULE_TABLE: [Rule; 9] = [
    Rule::new(Matcher::Any(&["temperature"]), TEMPERATURE),
    Rule::new(Matcher::Any(&["bgc", "biogeochemical"]), BGC),
    Rule::new(Matcher::Any(&["salinity"]), SALINITY),
    Rule::new(Matcher::Any(&["export", "download"]), EXPORT),
    Rule::new(Matcher::Any(&["trajectory", "path"]), TRAJECTORY),
    Rule::new(Matcher::Any(&["quality", "qc"]), QUALITY),
    Rule::new(Matcher::Any(&["deep", "depth"]), DEEP),
    Rule::new(Matcher::Any(&["oxygen", "o2"]), OXYGEN),
    Rule::new(Matcher::Any(&["unusual", "anomaly"]), UNUSUAL),
];

pub(crate) const RULES: RuleSet = RuleSet {
    surface: Surface::AssistantPage,
    rules: &RULE_TABLE,
    fallbacks: &FALLBACKS,
    greeting: GREETING,
    starter_queries: &SUGGESTED_QUERIES,
    greeting_suggestions: 4,
    follow_ups: &CONTEXTUAL_SUGGESTIONS,
    follow_up_count: 4,
    follow_up_threshold: 0.3,
    completions: &[],
};
