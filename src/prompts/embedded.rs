//! Embedded prompt templates and fixed instruction clauses
//!
//! The structural-preservation clauses are the contract with the image
//! model: renderings may restyle surfaces but never move geometry. They are
//! compiled in as constants so tests can assert their presence verbatim in
//! every composed prompt.

/// Structural-preservation requirements embedded in every create prompt
pub const CREATE_STRUCTURAL_CLAUSES: [&str; 7] = [
    "Preserve the EXACT same room layout, structure, and spatial arrangement",
    "Keep all windows, doors, skylights in their exact positions",
    "Keep all cabinets, counters, appliances in their exact positions",
    "Keep the same room dimensions and proportions",
    "Keep the same camera angle/perspective",
    "ONLY change surface finishes: paint colors, materials, flooring, backsplash, hardware",
    "DO NOT move, add, or remove any structural elements",
];

/// Structural-preservation requirements embedded in every edit prompt
pub const EDIT_STRUCTURAL_CLAUSES: [&str; 3] = [
    "The layout and structural arrangement must remain EXACTLY the same.",
    "Only modify surface finishes, colors, materials, and decorative elements.",
    "Preserve all windows, doors, appliances, cabinets, and architectural features in their current positions.",
];

/// Template for a create-rendering instruction
pub const CREATE_TEMPLATE: &str = r#"Create a highly detailed, photorealistic interior design image.

Original description: {{description}}

CRITICAL REQUIREMENTS:
- Preserve the EXACT same room layout, structure, and spatial arrangement
- Keep all windows, doors, skylights in their exact positions
- Keep all cabinets, counters, appliances in their exact positions
- Keep the same room dimensions and proportions
- Keep the same camera angle/perspective
- ONLY change surface finishes: paint colors, materials, flooring, backsplash, hardware
- DO NOT move, add, or remove any structural elements

Aspect ratio: {{aspect_ratio}}

Output a single detailed paragraph optimized for photorealistic interior rendering."#;

/// Template for an edit-rendering instruction
pub const EDIT_TEMPLATE: &str = r#"You are editing an existing renovation rendering.

Edit instructions: {{instructions}}

CRITICAL: The layout and structural arrangement must remain EXACTLY the same.
Only modify surface finishes, colors, materials, and decorative elements.
Preserve all windows, doors, appliances, cabinets, and architectural features in their current positions."#;

/// System instruction for advisory chat turns
pub const ADVISORY_SYSTEM: &str = r#"You are an expert AI Home Renovation Planner. Help users plan their home renovations by:
1. Analyzing current space photos and inspiration images
2. Providing design recommendations
3. Estimating renovation costs
4. Creating project timelines
5. Suggesting materials and finishes
6. Offering budget-friendly alternatives

Be enthusiastic, detailed, and practical in your recommendations. Ask clarifying questions when needed."#;
