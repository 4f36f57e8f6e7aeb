//! HTML reporter: generates a self-contained HTML dashboard
//!
//! Embeds the reports as JSON and renders them client-side with vanilla JS
//! (grade filter, search, sort by score).

use crate::analyzer::engine::AggregateStats;
use crate::{DocumentReport, Status};
use serde::Serialize;

/// Escapes a JSON payload for embedding inside a <script> block
fn escape_json_for_script(s: &str) -> String {
    // serde_json already escapes quotes/backslashes; only </script> can break out
    s.replace("</script>", "<\\/script>")
}

/// Reporter that generates a self-contained HTML dashboard
pub struct HtmlReporter;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsCheck {
    label: &'static str,
    status: Status,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsFinding {
    rule: String,
    status: Status,
    issue: String,
    recommendation: String,
}

/// Per-document payload
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsFile {
    path: String,
    title: String,
    keyword: Option<String>,
    score: u8,
    grade: String,
    below_threshold: bool,
    checks: Vec<JsCheck>,
    findings: Vec<JsFinding>,
}

impl HtmlReporter {
    pub fn new() -> Self {
        Self
    }

    /// Generate the full HTML report
    pub fn report(&self, reports: &[DocumentReport], stats: &AggregateStats) -> String {
        let js_files: Vec<JsFile> = reports.iter().map(Self::to_js_file).collect();
        let data_json = serde_json::to_string(&js_files).unwrap_or_else(|_| "[]".to_string());
        let stats_json = serde_json::to_string(stats).unwrap_or_else(|_| "{}".to_string());

        let mut html = String::with_capacity(16_384);
        html.push_str(TEMPLATE_HEAD);
        html.push_str("<script>const DATA=");
        html.push_str(&escape_json_for_script(&data_json));
        html.push_str(";const STATS=");
        html.push_str(&escape_json_for_script(&stats_json));
        html.push_str(";</script>\n");
        html.push_str(TEMPLATE_BODY);
        html.push_str(TEMPLATE_SCRIPT);
        html.push_str("</body>\n</html>");
        html
    }

    fn to_js_file(report: &DocumentReport) -> JsFile {
        let details = &report.result.details;
        JsFile {
            path: report.file_path.display().to_string(),
            title: report.title.clone(),
            keyword: report.primary_keyword.clone(),
            score: report.score(),
            grade: report.grade.to_string(),
            below_threshold: report.below_threshold(),
            checks: details
                .statuses()
                .into_iter()
                .map(|(rule, status)| JsCheck {
                    label: rule.label(),
                    status,
                })
                .collect(),
            findings: details
                .findings()
                .into_iter()
                .map(|f| JsFinding {
                    rule: f.rule.to_string(),
                    status: f.status,
                    issue: f.issue,
                    recommendation: f.recommendation,
                })
                .collect(),
        }
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

const TEMPLATE_HEAD: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>pagegrade - SEO Report</title>
<style>
:root{--bg:#0d0d11;--surface:#16161b;--surface2:#1e1e24;--border:#2a2a32;--text:#e4e4e7;--muted:#71717a;--green:#22c55e;--yellow:#eab308;--orange:#f97316;--red:#ef4444;--radius:8px}
*{box-sizing:border-box;margin:0;padding:0}
body{font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;background:var(--bg);color:var(--text);line-height:1.5}
header{padding:1.25rem 1.5rem;border-bottom:1px solid var(--border)}
header h1{font-size:1.125rem}
.stats-bar{display:flex;border-bottom:1px solid var(--border);background:var(--surface)}
.stat{flex:1;padding:.875rem 1.25rem;border-right:1px solid var(--border);text-align:center}
.stat:last-child{border-right:none}
.stat .val{font-size:1.5rem;font-weight:700;display:block}
.stat .lbl{font-size:.75rem;color:var(--muted);text-transform:uppercase}
.controls{padding:1rem 1.5rem;display:flex;gap:.75rem;align-items:center}
.search,select{background:var(--surface);border:1px solid var(--border);border-radius:var(--radius);padding:.45rem .7rem;color:var(--text);font-size:.8125rem}
.main{padding:0 1.5rem 2rem}
.file{background:var(--surface);border:1px solid var(--border);border-radius:var(--radius);margin-bottom:.5rem}
.file-hdr{display:grid;grid-template-columns:minmax(0,1fr) 60px 40px;gap:.5rem;padding:.6rem .9rem;cursor:pointer;font-size:.8125rem}
.file-hdr .path{overflow:hidden;text-overflow:ellipsis;white-space:nowrap}
.detail{display:none;padding:.5rem .9rem 1rem;border-top:1px solid var(--border)}
.detail.open{display:block}
.checks{display:flex;flex-wrap:wrap;gap:.4rem;margin-bottom:.75rem}
.check{font-size:.75rem;padding:.15rem .5rem;border-radius:4px;background:var(--surface2)}
.finding{font-size:.8125rem;padding:.35rem 0;border-bottom:1px solid var(--border)}
.finding:last-child{border-bottom:none}
.finding .rec{color:var(--muted);font-style:italic}
.grade-A,.grade-B,.st-good{color:var(--green)}
.grade-C,.st-warning{color:var(--yellow)}
.grade-D{color:var(--orange)}
.grade-F,.st-bad,.below{color:var(--red)}
.empty{text-align:center;padding:3rem 1rem;color:var(--muted)}
</style>
</head>
<body>
"##;

const TEMPLATE_BODY: &str = r##"<header><h1>pagegrade SEO Report</h1></header>
<div class="stats-bar" id="stats-bar"></div>
<div class="controls">
  <input type="search" class="search" id="search" placeholder="Search documents..." autocomplete="off">
  <select id="grade">
    <option value="all">All grades</option>
    <option>A</option><option>B</option><option>C</option><option>D</option><option>F</option>
  </select>
  <select id="sort">
    <option value="asc">Lowest score first</option>
    <option value="desc">Highest score first</option>
    <option value="path">Path</option>
  </select>
</div>
<div class="main" id="list"></div>
"##;

const TEMPLATE_SCRIPT: &str = r##"<script>
(function(){
const esc=s=>String(s==null?'':s).replace(/[&<>"']/g,c=>({'&':'&amp;','<':'&lt;','>':'&gt;','"':'&quot;',"'":'&#39;'}[c]));
const bar=document.getElementById('stats-bar');
[[STATS.filesAnalyzed,'Documents'],[STATS.averageScore+' '+STATS.averageGrade,'Average'],[STATS.totalIssues,'Issues'],[STATS.belowThreshold,'Below threshold']]
  .forEach(([v,l])=>{bar.insertAdjacentHTML('beforeend','<div class="stat"><span class="val">'+esc(v)+'</span><span class="lbl">'+l+'</span></div>');});
const list=document.getElementById('list');
function render(){
  const q=document.getElementById('search').value.toLowerCase();
  const g=document.getElementById('grade').value;
  const s=document.getElementById('sort').value;
  let rows=DATA.filter(f=>(g==='all'||f.grade===g)&&(f.path.toLowerCase().includes(q)||f.title.toLowerCase().includes(q)));
  rows.sort((a,b)=>s==='path'?a.path.localeCompare(b.path):s==='desc'?b.score-a.score:a.score-b.score);
  if(!rows.length){list.innerHTML='<div class="empty">No documents match.</div>';return;}
  list.innerHTML=rows.map((f,i)=>'<div class="file"><div class="file-hdr" data-i="'+i+'"><span class="path">'+esc(f.path)+(f.belowThreshold?' <span class="below">below threshold</span>':'')+'</span><span>'+f.score+'</span><span class="grade-'+f.grade+'">'+f.grade+'</span></div>'
    +'<div class="detail"><div>'+esc(f.title)+(f.keyword?' &middot; keyword: '+esc(f.keyword):'')+'</div><div class="checks">'
    +f.checks.map(c=>'<span class="check st-'+c.status+'">'+esc(c.label)+'</span>').join('')+'</div>'
    +f.findings.map(x=>'<div class="finding"><span class="st-'+x.status+'">'+esc(x.issue)+'</span><div class="rec">'+esc(x.recommendation)+'</div></div>').join('')
    +'</div></div>').join('');
}
list.addEventListener('click',e=>{const h=e.target.closest('.file-hdr');if(h)h.nextElementSibling.classList.toggle('open');});
['search','grade','sort'].forEach(id=>document.getElementById(id).addEventListener('input',render));
render();
})();
</script>
"##;
