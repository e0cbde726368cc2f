use super::avatar::AvatarScene;
use super::messages::Message;
use super::progress::LevelProgress;
use super::store::{Notice, NoticeKind};
use super::task::Task;
use super::user::User;
use prettytable::{format, row, Table};

const PROGRESS_BAR_WIDTH: usize = 20;
const ID_WIDTH: usize = 8;

pub struct View {}

impl View {
    pub fn tasks(tasks: &[Task]) {
        println!("\n{}", Message::TasksHeader);
        if tasks.is_empty() {
            println!("{}", Message::NoTasks);
            return;
        }

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row!["ID", "TITLE", "DESCRIPTION", "XP", "DONE"]);
        for task in tasks {
            table.add_row(row![
                short_id(&task.id),
                task.title,
                task.description.as_deref().unwrap_or(""),
                r->format!("+{}", task.xp_reward),
                c->if task.completed { "✔" } else { "" }
            ]);
        }
        table.printstd();
    }

    pub fn status(user: &User) {
        let progress = LevelProgress::from(user);
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_CLEAN);
        table.add_row(row![b->&user.name, user.email]);
        table.add_row(row![Message::LevelLabel(progress.level), progress_line(&progress)]);
        table.add_row(row!["XP", user.xp]);
        table.add_row(row!["Mood", user.avatar_mood.label()]);
        table.printstd();
    }

    pub fn avatar(scene: &AvatarScene) {
        println!("\n{}", Message::AvatarHeader);
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_CLEAN);
        table.add_row(row!["", c->face_art(scene)]);
        table.add_row(row!["Body", format!("{} (r={:.1})", scene.body.color, scene.body.radius)]);
        table.add_row(row!["Label", format!("{} · {}", scene.level_label, scene.mood_label)]);
        table.add_row(row![
            "Motion",
            format!("{} scale={:.2} y={:+.2}", scene.animation.as_str(), scene.motion.scale, scene.motion.y_offset)
        ]);
        table.printstd();
        if let Some(text) = &scene.message {
            println!("{}", Message::AvatarSays(text.clone()));
        }
    }

    pub fn notice(notice: &Notice) {
        match notice.kind {
            NoticeKind::Success => println!("{}", notice.text),
            NoticeKind::Error => eprintln!("{}", notice.text),
        }
    }
}

/// First characters of an id, enough to address a task from the command line.
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(ID_WIDTH) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

pub fn progress_line(progress: &LevelProgress) -> String {
    format!(
        "{} {}",
        progress.bar(PROGRESS_BAR_WIDTH),
        Message::ProgressLabel {
            current: progress.current,
            per_level: progress.per_level,
        }
    )
}

/// Small ASCII face, drawn on the upper line while the avatar is high in its bounce.
fn face_art(scene: &AvatarScene) -> String {
    let mouth = if scene.motion.scale > 1.05 { "◡" } else { "‿" };
    let face = format!("( ● {} ● )", mouth);
    if scene.motion.y_offset > 0.2 {
        format!("{}\n", face)
    } else {
        format!("\n{}", face)
    }
}
