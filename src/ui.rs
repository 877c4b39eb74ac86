use crate::models::{AppData, Side};

pub fn render_index(data: &AppData) -> String {
    let score = &data.engine.score;
    let sets = if score.sets.is_empty() {
        "-".to_string()
    } else {
        score
            .sets
            .iter()
            .map(|set| format!("{}-{}", set.us, set.them))
            .collect::<Vec<_>>()
            .join(" ")
    };
    let serving = match data.engine.serving_side {
        Side::Us => &data.team_names.us,
        Side::Them => &data.team_names.them,
    };

    INDEX_HTML
        .replace("{{US_NAME}}", &escape_html(&data.team_names.us))
        .replace("{{THEM_NAME}}", &escape_html(&data.team_names.them))
        .replace("{{US_POINTS}}", score.points.us.as_str())
        .replace("{{THEM_POINTS}}", score.points.them.as_str())
        .replace("{{US_GAMES}}", &score.current_set.us.to_string())
        .replace("{{THEM_GAMES}}", &score.current_set.them.to_string())
        .replace("{{SETS}}", &sets)
        .replace("{{SERVING}}", &escape_html(serving))
        .replace("{{SHOTS}}", &data.shot_log.len().to_string())
        .replace("{{TRAINING_SHOTS}}", &data.training.shots.len().to_string())
        .replace("{{MATCHES}}", &data.matches.len().to_string())
        .replace("{{SESSIONS}}", &data.training_sessions.len().to_string())
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Padel Scorer</title>
  <style>
    :root {
      --bg: #101614;
      --card: rgba(255, 255, 255, 0.06);
      --ink: #f2f5f3;
      --muted: #8a968f;
      --us: #5fa8ff;
      --them: #ff6b6b;
      --accent: #3ddc97;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 24px 16px;
    }

    .app {
      width: min(640px, 100%);
      display: grid;
      gap: 20px;
    }

    .board {
      background: var(--card);
      border-radius: 20px;
      padding: 20px;
      display: grid;
      grid-template-columns: 1fr auto 1fr;
      align-items: center;
      text-align: center;
      gap: 12px;
    }

    .team .name {
      font-size: 0.8rem;
      text-transform: uppercase;
      color: var(--muted);
    }

    .team .points {
      font-size: 3rem;
      font-weight: 600;
    }

    .team.us .points {
      color: var(--us);
    }

    .team.them .points {
      color: var(--them);
    }

    .meta {
      color: var(--muted);
      font-size: 0.85rem;
    }

    .controls {
      display: grid;
      grid-template-columns: repeat(2, 1fr);
      gap: 10px;
    }

    button {
      border: 1px solid rgba(255, 255, 255, 0.12);
      border-radius: 12px;
      padding: 12px;
      background: var(--card);
      color: var(--ink);
      font: inherit;
      cursor: pointer;
    }

    button.primary {
      background: rgba(61, 220, 151, 0.2);
      border-color: rgba(61, 220, 151, 0.4);
    }

    .status {
      min-height: 1.2em;
      color: var(--muted);
      font-size: 0.85rem;
    }

    .status[data-type="error"] {
      color: var(--them);
    }
  </style>
</head>
<body>
  <main class="app">
    <section class="board">
      <div class="team us">
        <div class="name">{{US_NAME}}</div>
        <div class="points">{{US_POINTS}}</div>
        <div class="meta">games {{US_GAMES}}</div>
      </div>
      <div class="meta">
        <div>sets</div>
        <div>{{SETS}}</div>
        <div>serve: {{SERVING}}</div>
      </div>
      <div class="team them">
        <div class="name">{{THEM_NAME}}</div>
        <div class="points">{{THEM_POINTS}}</div>
        <div class="meta">games {{THEM_GAMES}}</div>
      </div>
    </section>
    <section class="controls">
      <button type="button" data-post="/api/points/us">+ {{US_NAME}}</button>
      <button type="button" data-post="/api/points/them">+ {{THEM_NAME}}</button>
      <button type="button" data-post="/api/points/us/revert">- {{US_NAME}}</button>
      <button type="button" data-post="/api/points/them/revert">- {{THEM_NAME}}</button>
      <button type="button" data-post="/api/serve/flip">Switch serve</button>
      <button type="button" data-post="/api/serve/toss">Coin toss</button>
      <button type="button" data-post="/api/shots/undo">Undo shot</button>
      <button type="button" data-post="/api/match/reset">Reset match</button>
      <button type="button" class="primary" data-post="/api/match/finish">Finish and save</button>
      <button type="button" data-post="/api/training/save">Save training</button>
    </section>
    <p class="meta">
      {{SHOTS}} shots this match &middot; {{TRAINING_SHOTS}} training shots &middot;
      {{MATCHES}} saved matches &middot; {{SESSIONS}} saved sessions
    </p>
    <div class="status" id="status"></div>
  </main>
  <script>
    const statusEl = document.getElementById('status');

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const post = async (path) => {
      const response = await fetch(path, { method: 'POST' });
      if (!response.ok) {
        throw new Error(await response.text());
      }
      window.location.reload();
    };

    document.querySelectorAll('[data-post]').forEach((button) => {
      button.addEventListener('click', () => {
        post(button.dataset.post).catch((err) => setStatus(err.message, 'error'));
      });
    });
  </script>
</body>
</html>
"#;
