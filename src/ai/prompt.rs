// Prompt templates for the advisory calls.
//
// Constructs compact, structured prompts for the advisory model. Each prompt
// includes pre-computed numbers (net values, win probabilities, stat lines)
// so the model focuses on trade-offs and context rather than arithmetic.

use crate::league::category::Category;
use crate::league::matchup::Matchup;
use crate::league::player::Player;
use crate::league::team::Team;
use crate::scoring::matchup::row_probability;
use crate::scoring::net_value::net_value;
use crate::scoring::trade::CategoryImpact;

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

fn format_player_line(player: &Player) -> String {
    let s = &player.avg_stats;
    format!(
        "  {} ({} - {}) [{}] net value {:.1} | {:.1}pts {:.1}reb {:.1}ast {:.1}stl {:.1}blk {:.1}3pm {:.3}fg% {:.3}ft% {:.1}to\n",
        player.name,
        player.team,
        player.positions_str(),
        player.status.label(),
        net_value(player),
        s.pts,
        s.reb,
        s.ast,
        s.stl,
        s.blk,
        s.tpm,
        s.fgp,
        s.ftp,
        s.to,
    )
}

fn format_roster(roster: &[Player]) -> String {
    let mut out = String::with_capacity(roster.len() * 96);
    for player in roster {
        out.push_str(&format_player_line(player));
    }
    out
}

fn format_matchup_table(matchup: &Matchup) -> String {
    let mut out = String::with_capacity(matchup.categories.len() * 64);
    for row in &matchup.categories {
        out.push_str(&format!(
            "  {} : me {:.1} vs opp {:.1} (proj {:.1} vs {:.1}, win prob {}%)\n",
            row.category.label(),
            row.mine,
            row.opp,
            row.projected_mine,
            row.projected_opp,
            row_probability(row),
        ));
    }
    out
}

// ---------------------------------------------------------------------------
// Team insights
// ---------------------------------------------------------------------------

/// Build the AI Coach prompt: roster health, category strengths, and
/// suggested moves for the current week.
///
/// Protected players are listed as untouchable; the model must never suggest
/// dropping or trading them.
pub fn build_team_insights_prompt(roster: &[Player], matchup: &Matchup) -> String {
    let mut prompt = String::with_capacity(2048);

    prompt.push_str(
        "You are a fantasy basketball coach for a 9-category H2H league \
         (PTS, REB, AST, STL, BLK, 3PM, FG%, FT%, TO; turnovers count low).\n\n",
    );

    prompt.push_str("## MY ROSTER\n");
    prompt.push_str(&format_roster(roster));

    let protected: Vec<&str> = roster
        .iter()
        .filter(|p| p.protected)
        .map(|p| p.name.as_str())
        .collect();
    if !protected.is_empty() {
        prompt.push_str(&format!(
            "\nUNTOUCHABLE (never suggest dropping or trading): {}\n",
            protected.join(", ")
        ));
    }

    prompt.push_str(&format!(
        "\n## THIS WEEK vs {}\nScore: {}-{}\n",
        matchup.opp_team, matchup.score_mine, matchup.score_opp
    ));
    prompt.push_str(&format_matchup_table(matchup));

    prompt.push_str(
        "\n## WHAT I NEED\n\
         Give me 3-4 concise insights: injury risks to cover, which categories \
         to push or concede this week, and one roster move worth making. \
         Use the pre-computed numbers above - do NOT recompute anything.",
    );

    prompt
}

// ---------------------------------------------------------------------------
// Auto trade scout
// ---------------------------------------------------------------------------

/// Build the trade-scout prompt that asks for structured suggestions.
///
/// The response is constrained by the suggestion JSON schema at the client
/// layer; the prompt supplies the rosters and the synergy framing.
pub fn build_trade_scout_prompt(my_roster: &[Player], league_teams: &[Team]) -> String {
    let mut prompt = String::with_capacity(4096);

    prompt.push_str(
        "You are scouting trades for my 9-category H2H fantasy basketball team. \
         Propose 2-3 realistic 1-for-1 trades that improve my category balance. \
         Synergy means complementary categories, not raw totals.\n\n",
    );

    prompt.push_str("## MY ROSTER\n");
    prompt.push_str(&format_roster(my_roster));

    let tradeable: Vec<&str> = my_roster
        .iter()
        .filter(|p| !p.protected)
        .map(|p| p.name.as_str())
        .collect();
    prompt.push_str(&format!(
        "\nAssets I am willing to move: {}\n",
        tradeable.join(", ")
    ));

    prompt.push_str("\n## LEAGUE ROSTERS\n");
    for team in league_teams {
        if team.roster.is_empty() {
            continue;
        }
        prompt.push_str(&format!(
            "### {} (rank {}, {})\n",
            team.name, team.rank, team.record
        ));
        prompt.push_str(&format_roster(&team.roster));
    }

    prompt.push_str(
        "\nFor each trade: name the target, the asset to give, a 0-100 synergy \
         score, the per-category deltas, a one-paragraph pitch I can send the \
         other manager, and how hard the negotiation will be.",
    );

    prompt
}

// ---------------------------------------------------------------------------
// Trade verdict
// ---------------------------------------------------------------------------

/// Build a verdict prompt for one concrete give/receive pair, with the
/// pre-computed per-category deltas attached.
pub fn build_trade_verdict_prompt(
    give: &Player,
    receive: &Player,
    impacts: &[CategoryImpact],
) -> String {
    let mut prompt = String::with_capacity(1024);

    prompt.push_str(&format!(
        "Evaluate this 1-for-1 fantasy basketball trade for my 9-category H2H \
         team. I give {} and receive {}.\n\n## PLAYERS\n",
        give.name, receive.name
    ));
    prompt.push_str(&format_player_line(give));
    prompt.push_str(&format_player_line(receive));

    prompt.push_str("\n## PER-CATEGORY DELTAS (receive minus give)\n");
    for impact in impacts {
        prompt.push_str(&format!(
            "  {} : {:+.2} ({})\n",
            impact.category,
            impact.delta,
            if impact.is_improvement { "better" } else { "worse" }
        ));
    }

    prompt.push_str(
        "\nGive me a one-word verdict (ACCEPT, REJECT, or COUNTER) followed by \
         two sentences of reasoning. Use the deltas above - do NOT recompute.",
    );

    prompt
}

// ---------------------------------------------------------------------------
// Opponent scout report
// ---------------------------------------------------------------------------

/// Build a scouting report prompt for a single opposing team.
pub fn build_opponent_scout_prompt(opponent: &Team) -> String {
    let mut prompt = String::with_capacity(1024);

    prompt.push_str(&format!(
        "Scout this fantasy basketball opponent for me: {} (rank {}, record {}, \
         managed by {}).\n\n## THEIR ROSTER\n",
        opponent.name, opponent.rank, opponent.record, opponent.owner
    ));
    prompt.push_str(&format_roster(&opponent.roster));

    prompt.push_str(
        "\nGive me their 2-3 strongest categories, their most exploitable \
         weakness, and which of their players is most overvalued by their \
         raw numbers. 9-category H2H, turnovers count low. Be direct.",
    );

    prompt
}

// ---------------------------------------------------------------------------
// Matchup strategy
// ---------------------------------------------------------------------------

/// Build a week-strategy prompt from the live matchup snapshot.
pub fn build_matchup_strategy_prompt(matchup: &Matchup) -> String {
    let mut prompt = String::with_capacity(1536);

    prompt.push_str(&format!(
        "It is mid-week in my 9-category H2H fantasy basketball matchup: \
         {} vs {}, current score {}-{}.\n\n## CATEGORY BOARD\n",
        matchup.my_team, matchup.opp_team, matchup.score_mine, matchup.score_opp
    ));
    prompt.push_str(&format_matchup_table(matchup));

    let g = &matchup.games;
    prompt.push_str(&format!(
        "\nGames played: me {} / opp {}. Games remaining: me {} / opp {}.\n",
        g.played_mine, g.played_opp, g.remaining_mine, g.remaining_opp
    ));

    prompt.push_str(
        "\nUsing the win probabilities above, tell me which categories are \
         locks, which are lost causes to punt, and which 2-3 swing categories \
         to chase with streaming adds for the rest of the week.",
    );

    prompt
}

// ---------------------------------------------------------------------------
// Player deep dive
// ---------------------------------------------------------------------------

/// Build a deep-dive prompt for one player. Sent with the web-search tool
/// attached so the model can fold in recent news.
pub fn build_player_deep_dive_prompt(player: &Player) -> String {
    let mut prompt = String::with_capacity(768);

    prompt.push_str("Deep dive on one fantasy basketball player.\n\n## PLAYER\n");
    prompt.push_str(&format_player_line(player));

    if let Some(values) = &player.cat_values {
        prompt.push_str("\nStandardized category scores (league pool):\n");
        for cat in Category::ALL {
            prompt.push_str(&format!("  {} : {:+.1}\n", cat.label(), values.get(cat)));
        }
    }

    prompt.push_str(&format!(
        "\nCurrent status: {}.\n\nSearch for news from the last week, then give \
         me: rest-of-season outlook, injury or rotation risk, and whether to \
         buy, hold, or sell in a 9-category H2H league.",
        player.status.label()
    ));

    prompt
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
