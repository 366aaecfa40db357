//! Static pages.

/// Landing page linking to the dashboard.
pub const HOME_PAGE: &str = r#"<!DOCTYPE html>
<html lang="it">
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1" />
<title>Glowskill Dashboard Workspace</title>
<style>
  body { margin: 0; font-family: system-ui, -apple-system, "Segoe UI", sans-serif; color: #1f2937; background: #f9fafb; }
  main { min-height: 60vh; display: flex; flex-direction: column; align-items: center; justify-content: center; gap: 1.5rem; padding: 1.5rem; text-align: center; }
  h1 { font-size: 2.25rem; margin: 0; }
  p { max-width: 42rem; font-size: 1.125rem; color: #6b7280; margin: .75rem 0 0; }
  a { display: inline-block; padding: .75rem 1.5rem; border-radius: .5rem; background: #1f2937; color: #fff; text-decoration: none; }
</style>
</head>
<body>
<main>
  <div>
    <h1>Glowskill Dashboard Workspace</h1>
    <p>Explore the 24-month plan, revenue projections, and qualitative prospectus for Glowskill.</p>
  </div>
  <a href="/prospectus">Open Prospectus Dashboard →</a>
</main>
</body>
</html>
"#;
