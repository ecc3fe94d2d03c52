// ---------------------------------------------------------------------------
// render.rs — Snapshot -> HTML page / JSON body
// ---------------------------------------------------------------------------

use crate::config::Config;
use crate::models::SystemStats;
use crate::system_monitor::SystemSnapshot;

pub const PAGE_TITLE: &str = "Kali Linux GUI";

/// JSON body for `/api/stats`.
pub fn render_json(snap: &SystemSnapshot) -> SystemStats {
    SystemStats::from(snap)
}

/// Status page for `/`. Ports come from `config`, never from the environment.
pub fn render_html(snap: &SystemSnapshot, config: &Config) -> String {
    let stats = render_json(snap);
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n\
         <h1>{title}</h1>\n\
         <p>Platform: {platform}</p>\n\
         <p>CPU Usage: {cpu:.1}%</p>\n\
         <p>Memory Used: {mem_used} / {mem_total} ({mem_pct:.1}%)</p>\n\
         <p>Disk Used: {disk_used} / {disk_total} ({disk_pct:.1}%)</p>\n\
         <p>RDP port: {rdp}</p>\n\
         <p>Web UI port: {webui}</p>\n\
         </body>\n\
         </html>\n",
        title = PAGE_TITLE,
        platform = html_escape(&stats.platform),
        cpu = stats.cpu_percent,
        mem_used = stats.memory.used,
        mem_total = stats.memory.total,
        mem_pct = stats.memory.percent,
        disk_used = stats.disk.used,
        disk_total = stats.disk.total,
        disk_pct = stats.disk.percent,
        rdp = config.rdp_port,
        webui = config.webui_port,
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
