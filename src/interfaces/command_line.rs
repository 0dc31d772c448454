use crate::interfaces::{Interface, Message};
use crate::Error;
use chrono::Local;
use std::fs::{create_dir_all, write, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tracing::error;

/// 通过命令行来报告优化过程，实现了界面特征
///
/// 每一代所有个体的目标值会追加到输出目录下的 epochs.txt 中，格式为 `Epoch: n` 加上每个个体一行 `[time, -profit]`
pub struct CommandLine {
    pub output_dir: PathBuf,
    /// 为 true 时把文字输出写到 log.txt 而不是标准输出
    pub quiet: bool,
}

impl CommandLine {
    pub fn new(maybe_output_dir: Option<PathBuf>, quiet: bool) -> Result<Self, Error> {
        let output_dir = maybe_output_dir.unwrap_or_else(|| {
            let time = Local::now().format("%m-%d+%H_%M_%S").to_string();
            PathBuf::from(format!("output-{time}"))
        });
        create_dir_all(&output_dir)?;
        Ok(Self { output_dir, quiet })
    }

    fn writer(&self) -> std::io::Result<Box<dyn Write>> {
        if self.quiet {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(self.output_dir.join("log.txt"))?;
            Ok(Box::new(file))
        } else {
            Ok(Box::new(std::io::stdout()))
        }
    }

    fn append_epoch(&self, epoch: usize, objectives: &[[f64; 2]]) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.output_dir.join("epochs.txt"))?;
        writeln!(file, "Epoch: {epoch}")?;
        for [time, negative_profit] in objectives {
            writeln!(file, "[{time}, {negative_profit}]")?;
        }
        Ok(())
    }

    fn report(&self, message: Message) -> Result<(), Error> {
        let mut writer = self.writer()?;
        match message {
            Message::Initialized {
                population_size,
                discarded,
            } => writeln!(
                &mut writer,
                "初始种群生成完成，共 {population_size} 个个体，丢弃了 {discarded} 个不可行解"
            )?,
            Message::Epoch {
                epoch,
                fronts,
                front_size,
                least_time,
                best_profit,
                objectives,
            } => {
                self.append_epoch(epoch, &objectives)?;
                writeln!(
                    &mut writer,
                    "第 {epoch} 代：共 {fronts} 层前沿，非支配前沿有 {front_size} 个个体，最短用时 {least_time:.2}，最高收益 {best_profit:.2}"
                )?
            }
            Message::Elapsed { time } => writeln!(&mut writer, "计算一代用时：{time} μs")?,
            Message::CloneRetryLimit { retries } => writeln!(
                &mut writer,
                "防克隆重试 {retries} 次后仍与上一代重复，保留该子代"
            )?,
            Message::Finished { front } => {
                let Some(first) = front.first() else {
                    writeln!(&mut writer, "优化结束，但没有得到任何解")?;
                    return Ok(());
                };
                let fastest = front
                    .iter()
                    .min_by(|a, b| a.objectives.time.total_cmp(&b.objectives.time))
                    .unwrap_or(first);
                let richest = front
                    .iter()
                    .max_by(|a, b| a.objectives.profit.total_cmp(&b.objectives.profit))
                    .unwrap_or(first);
                let path = self.output_dir.join("front.yaml");
                write(&path, serde_yaml::to_string(&front)?)?;
                writeln!(
                    &mut writer,
                    "最短用时：{}，收益：{}\n最高收益：{}，用时：{}\n非支配前沿共 {} 个解，保存于 {} 中",
                    fastest.objectives.time,
                    fastest.objectives.profit,
                    richest.objectives.profit,
                    richest.objectives.time,
                    front.len(),
                    path.display()
                )?
            }
        }
        Ok(())
    }
}

impl Interface for CommandLine {
    fn send(&self, message: Message) {
        if let Err(e) = self.report(message) {
            error!("输出失败：{}", e);
        }
    }
}
