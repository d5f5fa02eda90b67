// Streaming dashboard service - Progressive loading with chunked JSON
use crate::application::dashboard_service::{metadata_panel, DashboardError, DashboardService};
use crate::domain::aggregation::Granularity;
use crate::domain::dashboard::{DashboardContext, DashboardSection, SectionKind, COMPARISON_SECTION};
use crate::domain::view_state::RangeSelection;
use crate::infrastructure::dto::{
    metadata_to_dto, section_name, section_to_dto, CompletionDto, RangeDto, SkeletonDto,
    StreamMessage,
};
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Clone)]
pub struct StreamingDashboardService {
    dashboards: DashboardService,
    channel_capacity: usize,
}

impl StreamingDashboardService {
    pub fn new(dashboards: DashboardService, channel_capacity: usize) -> Self {
        Self {
            dashboards,
            channel_capacity: channel_capacity.max(1),
        }
    }

    /// Skeleton first, then each section as its task finishes, then the
    /// metadata panel, then a completion event.
    pub async fn stream_dashboard(
        &self,
        farm: &str,
        selection: RangeSelection,
        granularity: Granularity,
    ) -> Result<mpsc::Receiver<StreamMessage>, DashboardError> {
        let context = self.dashboards.context(farm, selection, granularity).await?;
        let (tx, rx) = mpsc::channel(self.channel_capacity);
        let start_time = Instant::now();

        // 1. Skeleton so the client can lay out every chart immediately
        if tx.send(StreamMessage::Skeleton(build_skeleton(&context))).await.is_err() {
            tracing::debug!("Client went away before the skeleton for {} was sent", farm);
        }

        // 2. One task per section
        let mut handles: Vec<JoinHandle<bool>> = SectionKind::ALL
            .iter()
            .map(|kind| {
                let kind = *kind;
                let tx = tx.clone();
                let context = context.clone();
                tokio::spawn(async move {
                    send_section(&tx, context.section(kind)).await
                })
            })
            .collect();

        let dashboards = self.dashboards.clone();
        let range = context.view.range;
        let comparison_tx = tx.clone();
        handles.push(tokio::spawn(async move {
            match dashboards.compare(&range).await {
                Ok(farms) => send_section(&comparison_tx, DashboardSection::Comparison(farms)).await,
                Err(e) => {
                    tracing::error!("Error building farm comparison: {}", e);
                    false
                }
            }
        }));

        // 3. Metadata panel after the charts, in its own task so a failure
        //    there cannot hold back the computed sections
        tokio::spawn(async move {
            let mut sent = 0;
            for handle in handles {
                match handle.await {
                    Ok(true) => sent += 1,
                    Ok(false) => {}
                    Err(e) => tracing::error!("Dashboard section task failed: {}", e),
                }
            }

            let metadata_tx = tx.clone();
            let metadata_task = tokio::spawn(async move {
                tokio::task::yield_now().await;
                let panel = metadata_to_dto(metadata_panel(&context));
                if metadata_tx.send(StreamMessage::Metadata(panel)).await.is_err() {
                    tracing::debug!("Client went away before the metadata panel was sent");
                }
            });
            if let Err(e) = metadata_task.await {
                tracing::warn!("Metadata panel task failed: {}", e);
            }

            let duration_ms = start_time.elapsed().as_millis() as i64;
            tracing::debug!("Streamed {} sections in {} ms", sent, duration_ms);
            let complete = StreamMessage::Complete(CompletionDto {
                sections: sent,
                duration_ms,
            });
            if tx.send(complete).await.is_err() {
                tracing::debug!("Client went away before completion was sent");
            }
        });

        Ok(rx)
    }
}

fn build_skeleton(context: &DashboardContext) -> SkeletonDto {
    let mut sections: Vec<&'static str> = SectionKind::ALL.iter().map(|k| k.name()).collect();
    sections.push(COMPARISON_SECTION);

    SkeletonDto {
        farm: context.view.farm.clone(),
        title: context.title(),
        subtitle: context.subtitle().to_string(),
        range: RangeDto::from(&context.view.range),
        granularity: context.view.granularity,
        sections,
    }
}

async fn send_section(tx: &mpsc::Sender<StreamMessage>, section: DashboardSection) -> bool {
    let dto = section_to_dto(section);
    let name = section_name(&dto);
    match tx.send(StreamMessage::Section(dto)).await {
        Ok(()) => true,
        Err(_) => {
            tracing::debug!("Client went away before section {} was sent", name);
            false
        }
    }
}
