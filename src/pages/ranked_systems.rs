// "Ranked Voting Systems: Tradeoffs and Options Abound"

use footnotes::builder::FootnoteGenerator;
use snafu::ResultExt;

use crate::pages::layout::*;
use crate::pages::*;

const COPELAND_LINK: &str = "https://en.wikipedia.org/wiki/Copeland%27s_method";
const KEMENY_YOUNG_LINK: &str = "https://en.wikipedia.org/wiki/Kemeny%E2%80%93Young_method";
const FAIRVOTE_RCV_LINK: &str = "https://www.fairvote.org/rcv";

pub const TITLE: &str = "Ranked Voting Systems: Tradeoffs and Options Abound";

/// Declares the page content. The citations are registered in document order.
pub fn page(gen: &mut FootnoteGenerator<'_>, section_class: &str) -> PageResult<PageSection> {
    let mut blocks: Vec<Block> = Vec::new();

    blocks.push(Block::Paragraph(vec![Inline::text(
        "There are an entire class of preferential voting systems - Condorcet Methods - that satisfy the Condorcet Criterion.",
    )]));

    let copeland = gen
        .cite("More on the Copeland method can be found below.", COPELAND_LINK)
        .context(FootnoteSnafu {})?;
    blocks.push(Block::Paragraph(vec![
        Inline::bold("\"Copeland's method\""),
        Inline::text(","),
        Inline::Citation(copeland),
        Inline::text(
            "for example, calculates the pairwise victories and pairwise defeats for each candidate. \
             Using these values, each candidate receives a score corresponding to their victories minus their defeats; \
             the candidate with the highest score wins. \
             While Copeland's method satisfies both the Condorcet Criterion and is Smith Efficient, it often produces a tie when there are three-way Smith cycles. \
             This poses a practical concern for this technique.",
        ),
    ]));

    let kemeny_young = gen
        .cite("More on the Kemeny-Young method can be found below.", KEMENY_YOUNG_LINK)
        .context(FootnoteSnafu {})?;
    blocks.push(Block::Paragraph(vec![
        Inline::bold("\"Kemeny–Young's method\""),
        Inline::Citation(kemeny_young),
        Inline::text(
            "is another Condorcet Method, one that assigns scores to each possible sequence of preferences that voters could provide. \
             Those scores are then compared, based on the voting results, and the sequence with the highest possible score is chosen. \
             The most-preferred candidate in that sequence is then chosen as the overall winner. \
             This method, in addition to being more mathematically complicated than previous approaches, is algorithmically NP-hard. \
             It's unlikely that there is a polynomial-time algorithm to find a victor for an arbitrary election with 'n' candidates, posing implementation and scaling concerns.",
        ),
    ]));

    let irv = gen
        .cite("More on IRV/RCV can be found below", FAIRVOTE_RCV_LINK)
        .context(FootnoteSnafu {})?;
    blocks.push(Block::Paragraph(vec![
        Inline::text(
            "These are only a few of the many different Condorcet Methods, and each one has significant research dissecting its pros and cons. \
             There are also some Ranked Voting systems that aren't Condorcet Methods. \
             Arguably one of the most popular Ranked Voting systems,",
        ),
        Inline::bold("\"Instant Runoff Voting\"/\"Ranked Choice Voting\""),
        Inline::text(","),
        Inline::Citation(irv),
        Inline::text(
            "fails in this regard. \
             But what IRV lacks in there, it gains in simplicity. \
             The algorithm is as follows:",
        ),
    ]));

    // Narrative only: the steps are shown to the reader, never executed.
    blocks.push(Block::OrderedList(vec![
        "If there is a majority candidate, select them.".to_string(),
        "Else, remove the candidate in last place, reallocating their votes to each voter's next-in-line preference.".to_string(),
        "Repeat 1-2 until a candidate is selected.".to_string(),
    ]));

    let burlington = gen
        .cite(
            "The fact that the victor, Bob Kiss, was neither the Condorcet winner nor the plurality winner multiplied the controversy. \
             IRV critics seized this outcome as an opportunity to highlight some of RCV/IRV's shortcomings. \
             More details on the fallout of this election can be found below.",
            FAIRVOTE_RCV_LINK,
        )
        .context(FootnoteSnafu {})?;
    blocks.push(Block::Row {
        class: "row d-flex align-items-center".to_string(),
        columns: vec![
            Column {
                class: "col-lg-4".to_string(),
                blocks: vec![
                    Block::Paragraph(vec![
                        Inline::text(
                            "A concern with IRV, however, is that the elimination of an outlier can result in a temporary boost of a suboptimal candidate. \
                             This can occasionally knock overall front runners into last place and remove them from the race. \
                             That's how IRV can fail the Condorcet Criterion. \
                             Here is an example where, after the arrival of",
                        ),
                        Inline::span("text-secondary", "Sapphire Sally"),
                        Inline::text("and a shifting of the political landscape,"),
                        Inline::span("text-primary", "Calista"),
                        Inline::text("loses to"),
                        Inline::span("text-primary", "Rosie"),
                        Inline::text(", who she could have beaten 1-on-1 thanks to"),
                        Inline::span("text-secondary", "Bennie's"),
                        Inline::text("shifted supporters."),
                    ]),
                    Block::Paragraph(vec![
                        Inline::text(
                            "This permutation on the Spoiler Effect is not just mathematically possible, but much like the Singapore example from earlier has happened in recent history. \
                             Specifically, Burlington, Vermont's 2009 mayoral election saw this outcome, inspiring the city to repeal IRV and reinstate FPTP.",
                        ),
                        Inline::Citation(burlington),
                    ]),
                ],
            },
            Column {
                class: "col-lg-8".to_string(),
                blocks: vec![Block::Table(sally_shift_table())],
            },
        ],
    });

    blocks.push(Block::Paragraph(vec![Inline::text(
        "But let's back up a second - why are we even discussing methods that don't meet our Condorcet Criterion? \
         As we recognized when we began this exploration, it's critical that our analysis of voting systems be grounded in certainty. \
         Precise analysis permits objective, nonpartisan discussions about different voting algorithms, their pros, and their cons. \
         But while not meeting the Condorcet Criterion is a con, failing in that regard doesn't disqualify a system unilaterally.",
    )]));

    blocks.push(Block::Paragraph(vec![Inline::text(
        "Analysis does not dictate which tradeoffs we should make. \
         It can only inform them.",
    )]));

    Ok(PageSection {
        class: section_class.to_string(),
        title: TITLE.to_string(),
        blocks,
    })
}

/// `tallies` are the counts of the three rounds, `changes` the transfers between them.
fn row(
    candidate: &str,
    tallies: [u64; 3],
    changes: [i64; 2],
    highlighted: Option<usize>,
    winner: bool,
) -> TallyRow {
    let values = vec![
        TallyValue::Count(tallies[0]),
        TallyValue::Change(changes[0]),
        TallyValue::Count(tallies[1]),
        TallyValue::Change(changes[1]),
        TallyValue::Count(tallies[2]),
    ];
    TallyRow {
        candidate: candidate.to_string(),
        values,
        highlighted,
        winner,
    }
}

/// The Burlington-style example: Sally's arrival knocks out Calista.
fn sally_shift_table() -> TallyTable {
    TallyTable {
        caption: "Sally Shifts The IRV Election; Calista, Our Condorcet Winner, Loses".to_string(),
        headers: [
            "Candidates",
            "Original Tally",
            "1st Change",
            "New Tally",
            "2nd Change",
            "New Tally",
            "Winner",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
        rows: vec![
            row("Rosie", [24, 32, 63], [8, 31], None, true),
            row("Bennie", [30, 37, 37], [7, 0], None, false),
            row("Calista", [31, 31, 0], [0, -31], Some(2), false),
            row("Sally", [15, 0, 0], [-15, 0], Some(0), false),
        ],
    }
}
