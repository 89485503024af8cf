// Terminal rendering of the dashboard page
use crate::application::agent_view::AgentView;
use crate::application::dashboard_view::DashboardView;
use crate::domain::care_profile::{BabyStage, FOCUS_OPTIONS};

pub const EMPTY_TIPS_MESSAGE: &str = "暂时没有贴士，可调整关注点再试试。";
pub const PLAN_PENDING_MESSAGE: &str = "正在生成照护计划...";
pub const ANSWER_PLACEHOLDER: &str = "提交问题后即可收到温柔且专业的陪伴建议。";

pub fn render_page(dashboard: &DashboardView, agent: &AgentView) -> String {
    [
        render_header(dashboard),
        render_profile(dashboard),
        render_tips(dashboard),
        render_care_plan(dashboard),
        render_agent(agent),
    ]
    .join("\n")
}

pub fn render_header(dashboard: &DashboardView) -> String {
    let refresh = if dashboard.is_loading() {
        "加载中..."
    } else {
        "刷新建议"
    };

    [
        "Mastra · Baby Coach".to_string(),
        "== 宝宝成长指挥台 ==".to_string(),
        format!("[{}]", refresh),
    ]
    .join("\n")
        + "\n"
}

pub fn render_profile(dashboard: &DashboardView) -> String {
    let profile = dashboard.profile();
    let mut lines = vec![
        "## 宝宝档案".to_string(),
        format!("宝宝昵称: {}", profile.name),
        format!("宝宝周龄: {}", profile.baby_age_weeks),
    ];

    let stages: Vec<String> = BabyStage::ALL
        .iter()
        .map(|stage| {
            let mark = if *stage == profile.baby_stage { "(*)" } else { "( )" };
            format!("{} {} {}", mark, stage.as_str().to_ascii_lowercase(), stage.label())
        })
        .collect();
    lines.push(format!("成长阶段: {}", stages.join("  ")));

    let focus: Vec<String> = FOCUS_OPTIONS
        .iter()
        .map(|option| {
            let mark = if profile.has_focus(option.value) { "[x]" } else { "[ ]" };
            format!("{} {} {}", mark, option.value, option.label)
        })
        .collect();
    lines.push(format!("想关注: {}", focus.join("  ")));

    lines.join("\n") + "\n"
}

pub fn render_tips(dashboard: &DashboardView) -> String {
    let mut lines = vec!["## 今日贴士".to_string()];

    for tip in dashboard.tips() {
        lines.push(format!("#{}", tip.category));
        lines.push(format!("  {}", tip.title));
        lines.push(format!("  {}", tip.description));
    }

    if dashboard.shows_empty_fallback() {
        lines.push(EMPTY_TIPS_MESSAGE.to_string());
    }

    lines.join("\n") + "\n"
}

pub fn render_care_plan(dashboard: &DashboardView) -> String {
    let mut lines = vec!["## 成长陪伴计划".to_string()];

    match dashboard.care_plan() {
        Some(plan) => {
            lines.push(plan.summary.clone());
            lines.push(format!("- 喂养策略：{}", plan.feeding_focus));
            lines.push(format!("- 睡眠节律：{}", plan.sleep_focus));
            lines.push(format!("- 互动灵感：{}", plan.play_focus));
            lines.push(format!("- 发展观察：{}", plan.development_focus));
            let chips: Vec<String> = plan.reminders.iter().map(|r| format!("[{}]", r)).collect();
            lines.push(format!("温柔提醒：{}", chips.join(" ")));
        }
        None => lines.push(PLAN_PENDING_MESSAGE.to_string()),
    }

    lines.join("\n") + "\n"
}

pub fn render_agent(agent: &AgentView) -> String {
    let send = if agent.is_asking() {
        "正在连线教练..."
    } else {
        "发送问题"
    };

    let mut lines = vec![
        "## 向 AI 育儿教练提问".to_string(),
        format!("> {}", agent.question()),
        format!("[{}]", send),
    ];

    if let Some(error) = agent.last_error() {
        lines.push(format!("提问失败：{}", error));
    }

    match agent.answer() {
        Some(answer) => {
            lines.push("教练答复".to_string());
            lines.push(answer.message.clone());
            for item in &answer.highlights {
                lines.push(format!("* {}", item));
            }
        }
        None => lines.push(ANSWER_PLACEHOLDER.to_string()),
    }

    lines.join("\n") + "\n"
}
