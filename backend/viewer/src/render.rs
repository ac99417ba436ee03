use heroes::Hero;

use crate::view::{HeroView, Phase};

/// Card descriptions are cut here, the detail view shows everything.
pub const DESCRIPTION_LIMIT: usize = 120;

#[derive(Debug, PartialEq, Eq)]
pub struct RoleStyle {
    pub icon: &'static str,
    pub plural: &'static str,
}

const ROLE_STYLES: &[(&str, RoleStyle)] = &[
    ("tank", RoleStyle { icon: "🛡", plural: "Tanks" }),
    ("fighter", RoleStyle { icon: "⚔", plural: "Fighters" }),
    ("assassin", RoleStyle { icon: "🗡", plural: "Assassins" }),
    ("mage", RoleStyle { icon: "✦", plural: "Mages" }),
    ("marksman", RoleStyle { icon: "🏹", plural: "Marksmen" }),
    ("support", RoleStyle { icon: "✚", plural: "Supports" }),
];

const UNKNOWN_ROLE: RoleStyle = RoleStyle {
    icon: "•",
    plural: "Heroes",
};

pub fn role_style(role: &str) -> &'static RoleStyle {
    let role = role.trim();

    ROLE_STYLES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(role))
        .map(|(_, style)| style)
        .unwrap_or(&UNKNOWN_ROLE)
}

pub fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", text[..cut].trim_end()),
        None => text.to_string(),
    }
}

pub fn card(index: usize, hero: &Hero) -> String {
    let role = hero.role_label();
    let style = role_style(&role);

    format!(
        "[{index}] {icon} {name}\n    Role: {role} | Pick Rate: {rate}%\n    {description}\n    {image}",
        icon = style.icon,
        name = hero.name(),
        rate = hero.pick_rate_label(),
        description = truncate(&hero.description_text(), DESCRIPTION_LIMIT),
        image = hero.image(),
    )
}

/// Everything below the search bar.
pub fn grid(view: &HeroView) -> String {
    if view.phase() == Phase::Loading {
        return "Loading heroes...".to_string();
    }

    let visible = view.visible();

    if visible.is_empty() {
        return "No heroes found\nTry a different search term or browse all heroes (:all)."
            .to_string();
    }

    let mut lines = Vec::with_capacity(visible.len() + 1);

    if let Some(role) = view.role_filter() {
        lines.push(format!(
            "{} ({})",
            role_style(role).plural,
            visible.len()
        ));
    }

    lines.extend(
        visible
            .iter()
            .enumerate()
            .map(|(i, hero)| card(i + 1, hero)),
    );

    lines.join("\n\n")
}

pub fn detail(hero: &Hero) -> String {
    let role = hero.role_label();

    format!(
        "{icon} {name}\n{role}\n\nImage: {image}\nRole: {role} | Pick Rate: {rate}%\n\nDescription:\n{description}",
        icon = role_style(&role).icon,
        name = hero.name(),
        image = hero.image(),
        rate = hero.pick_rate_label(),
        description = hero.description_text(),
    )
}
