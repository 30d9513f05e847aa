//! Online meetings: `/communications/onlineMeetings`
//!
//! Includes attendance reports, the binary attendee report, recordings and
//! transcripts. Recording and transcript content is returned as raw bytes.

use bytes::Bytes;
use serde_json::Value;

use super::client::GraphClient;
use super::query::ODataQuery;
use super::under;
use crate::error::{require, Result};
use crate::models::{
    AttendanceRecord, CallRecording, CallTranscript, CreateOrGetOnlineMeetingRequest,
    MeetingAttendanceReport, OnlineMeeting, VirtualAppointmentReminderSmsRequest,
    VirtualAppointmentSmsRequest,
};

const MEETINGS: [&str; 2] = ["communications", "onlineMeetings"];

pub struct OnlineMeetingsApi<'a> {
    client: &'a GraphClient,
}

fn meeting_path(meeting_id: &str) -> Result<[&str; 3]> {
    let meeting_id = require("meeting_id", meeting_id)?;
    Ok(["communications", "onlineMeetings", meeting_id])
}

fn report_path<'p>(meeting_id: &'p str, report_id: &'p str) -> Result<[&'p str; 5]> {
    let [c, o, meeting_id] = meeting_path(meeting_id)?;
    let report_id = require("report_id", report_id)?;
    Ok([c, o, meeting_id, "attendanceReports", report_id])
}

fn recording_path<'p>(meeting_id: &'p str, recording_id: &'p str) -> Result<[&'p str; 5]> {
    let [c, o, meeting_id] = meeting_path(meeting_id)?;
    let recording_id = require("recording_id", recording_id)?;
    Ok([c, o, meeting_id, "recordings", recording_id])
}

fn transcript_path<'p>(meeting_id: &'p str, transcript_id: &'p str) -> Result<[&'p str; 5]> {
    let [c, o, meeting_id] = meeting_path(meeting_id)?;
    let transcript_id = require("transcript_id", transcript_id)?;
    Ok([c, o, meeting_id, "transcripts", transcript_id])
}

impl<'a> OnlineMeetingsApi<'a> {
    pub(crate) fn new(client: &'a GraphClient) -> Self {
        Self { client }
    }

    // -- Meetings --

    pub async fn list_online_meetings(&self, query: &ODataQuery) -> Result<Value> {
        self.client.get(&MEETINGS, query).await
    }

    pub async fn count_online_meetings(&self, query: &ODataQuery) -> Result<u64> {
        self.client
            .get_count(&under(&MEETINGS, &["$count"]), query)
            .await
    }

    /// Create a standalone meeting. See [`OnlineMeeting::new`].
    pub async fn create_online_meeting(&self, meeting: &OnlineMeeting) -> Result<Value> {
        self.client.post(&MEETINGS, meeting).await
    }

    pub async fn get_online_meeting(&self, meeting_id: &str, query: &ODataQuery) -> Result<Value> {
        let path = meeting_path(meeting_id)?;
        self.client.get(&path, query).await
    }

    pub async fn update_online_meeting(
        &self,
        meeting_id: &str,
        meeting: &OnlineMeeting,
    ) -> Result<Value> {
        let path = meeting_path(meeting_id)?;
        self.client.patch(&path, meeting).await
    }

    pub async fn delete_online_meeting(&self, meeting_id: &str) -> Result<()> {
        let path = meeting_path(meeting_id)?;
        self.client.delete(&path).await
    }

    /// Return the meeting with the given `externalId`, creating it if needed.
    pub async fn create_or_get(&self, body: &CreateOrGetOnlineMeetingRequest) -> Result<Value> {
        self.client
            .post(&under(&MEETINGS, &["createOrGet"]), body)
            .await
    }

    pub async fn get_virtual_appointment_join_web_url(&self, meeting_id: &str) -> Result<Value> {
        let path = meeting_path(meeting_id)?;
        self.client
            .get(
                &under(&path, &["getVirtualAppointmentJoinWebUrl()"]),
                &ODataQuery::new(),
            )
            .await
    }

    pub async fn send_virtual_appointment_reminder_sms(
        &self,
        meeting_id: &str,
        body: &VirtualAppointmentReminderSmsRequest,
    ) -> Result<Value> {
        let path = meeting_path(meeting_id)?;
        self.client
            .post(&under(&path, &["sendVirtualAppointmentReminderSms"]), body)
            .await
    }

    pub async fn send_virtual_appointment_sms(
        &self,
        meeting_id: &str,
        body: &VirtualAppointmentSmsRequest,
    ) -> Result<Value> {
        let path = meeting_path(meeting_id)?;
        self.client
            .post(&under(&path, &["sendVirtualAppointmentSms"]), body)
            .await
    }

    // -- Attendance reports --

    pub async fn list_attendance_reports(
        &self,
        meeting_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let path = meeting_path(meeting_id)?;
        self.client
            .get(&under(&path, &["attendanceReports"]), query)
            .await
    }

    pub async fn count_attendance_reports(
        &self,
        meeting_id: &str,
        query: &ODataQuery,
    ) -> Result<u64> {
        let path = meeting_path(meeting_id)?;
        self.client
            .get_count(&under(&path, &["attendanceReports", "$count"]), query)
            .await
    }

    pub async fn create_attendance_report(
        &self,
        meeting_id: &str,
        report: &MeetingAttendanceReport,
    ) -> Result<Value> {
        let path = meeting_path(meeting_id)?;
        self.client
            .post(&under(&path, &["attendanceReports"]), report)
            .await
    }

    pub async fn get_attendance_report(
        &self,
        meeting_id: &str,
        report_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let path = report_path(meeting_id, report_id)?;
        self.client.get(&path, query).await
    }

    pub async fn update_attendance_report(
        &self,
        meeting_id: &str,
        report_id: &str,
        report: &MeetingAttendanceReport,
    ) -> Result<Value> {
        let path = report_path(meeting_id, report_id)?;
        self.client.patch(&path, report).await
    }

    pub async fn delete_attendance_report(&self, meeting_id: &str, report_id: &str) -> Result<()> {
        let path = report_path(meeting_id, report_id)?;
        self.client.delete(&path).await
    }

    // -- Attendance records --

    pub async fn list_attendance_records(
        &self,
        meeting_id: &str,
        report_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let path = report_path(meeting_id, report_id)?;
        self.client
            .get(&under(&path, &["attendanceRecords"]), query)
            .await
    }

    pub async fn count_attendance_records(
        &self,
        meeting_id: &str,
        report_id: &str,
        query: &ODataQuery,
    ) -> Result<u64> {
        let path = report_path(meeting_id, report_id)?;
        self.client
            .get_count(&under(&path, &["attendanceRecords", "$count"]), query)
            .await
    }

    pub async fn create_attendance_record(
        &self,
        meeting_id: &str,
        report_id: &str,
        record: &AttendanceRecord,
    ) -> Result<Value> {
        let path = report_path(meeting_id, report_id)?;
        self.client
            .post(&under(&path, &["attendanceRecords"]), record)
            .await
    }

    pub async fn get_attendance_record(
        &self,
        meeting_id: &str,
        report_id: &str,
        record_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let path = report_path(meeting_id, report_id)?;
        let record_id = require("record_id", record_id)?;
        self.client
            .get(&under(&path, &["attendanceRecords", record_id]), query)
            .await
    }

    pub async fn update_attendance_record(
        &self,
        meeting_id: &str,
        report_id: &str,
        record_id: &str,
        record: &AttendanceRecord,
    ) -> Result<Value> {
        let path = report_path(meeting_id, report_id)?;
        let record_id = require("record_id", record_id)?;
        self.client
            .patch(&under(&path, &["attendanceRecords", record_id]), record)
            .await
    }

    pub async fn delete_attendance_record(
        &self,
        meeting_id: &str,
        report_id: &str,
        record_id: &str,
    ) -> Result<()> {
        let path = report_path(meeting_id, report_id)?;
        let record_id = require("record_id", record_id)?;
        self.client
            .delete(&under(&path, &["attendanceRecords", record_id]))
            .await
    }

    // -- Attendee report (live events, binary) --

    pub async fn get_attendee_report(&self, meeting_id: &str) -> Result<Bytes> {
        let path = meeting_path(meeting_id)?;
        self.client
            .get_bytes(&under(&path, &["attendeeReport"]))
            .await
    }

    pub async fn put_attendee_report(
        &self,
        meeting_id: &str,
        content: impl Into<Bytes>,
    ) -> Result<Value> {
        let path = meeting_path(meeting_id)?;
        self.client
            .put_bytes(&under(&path, &["attendeeReport"]), content)
            .await
    }

    pub async fn delete_attendee_report(&self, meeting_id: &str) -> Result<()> {
        let path = meeting_path(meeting_id)?;
        self.client.delete(&under(&path, &["attendeeReport"])).await
    }

    // -- Recordings --

    pub async fn list_recordings(&self, meeting_id: &str, query: &ODataQuery) -> Result<Value> {
        let path = meeting_path(meeting_id)?;
        self.client.get(&under(&path, &["recordings"]), query).await
    }

    pub async fn count_recordings(&self, meeting_id: &str, query: &ODataQuery) -> Result<u64> {
        let path = meeting_path(meeting_id)?;
        self.client
            .get_count(&under(&path, &["recordings", "$count"]), query)
            .await
    }

    pub async fn create_recording(
        &self,
        meeting_id: &str,
        recording: &CallRecording,
    ) -> Result<Value> {
        let path = meeting_path(meeting_id)?;
        self.client
            .post(&under(&path, &["recordings"]), recording)
            .await
    }

    pub async fn get_recording(
        &self,
        meeting_id: &str,
        recording_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let path = recording_path(meeting_id, recording_id)?;
        self.client.get(&path, query).await
    }

    pub async fn update_recording(
        &self,
        meeting_id: &str,
        recording_id: &str,
        recording: &CallRecording,
    ) -> Result<Value> {
        let path = recording_path(meeting_id, recording_id)?;
        self.client.patch(&path, recording).await
    }

    pub async fn delete_recording(&self, meeting_id: &str, recording_id: &str) -> Result<()> {
        let path = recording_path(meeting_id, recording_id)?;
        self.client.delete(&path).await
    }

    pub async fn recordings_delta(&self, meeting_id: &str, query: &ODataQuery) -> Result<Value> {
        let path = meeting_path(meeting_id)?;
        self.client
            .get(&under(&path, &["recordings", "delta()"]), query)
            .await
    }

    /// Recording media, usually `video/mp4`.
    pub async fn get_recording_content(
        &self,
        meeting_id: &str,
        recording_id: &str,
    ) -> Result<Bytes> {
        let path = recording_path(meeting_id, recording_id)?;
        self.client.get_bytes(&under(&path, &["content"])).await
    }

    pub async fn put_recording_content(
        &self,
        meeting_id: &str,
        recording_id: &str,
        content: impl Into<Bytes>,
    ) -> Result<Value> {
        let path = recording_path(meeting_id, recording_id)?;
        self.client
            .put_bytes(&under(&path, &["content"]), content)
            .await
    }

    pub async fn delete_recording_content(
        &self,
        meeting_id: &str,
        recording_id: &str,
    ) -> Result<()> {
        let path = recording_path(meeting_id, recording_id)?;
        self.client.delete(&under(&path, &["content"])).await
    }

    // -- Transcripts --

    pub async fn list_transcripts(&self, meeting_id: &str, query: &ODataQuery) -> Result<Value> {
        let path = meeting_path(meeting_id)?;
        self.client
            .get(&under(&path, &["transcripts"]), query)
            .await
    }

    pub async fn count_transcripts(&self, meeting_id: &str, query: &ODataQuery) -> Result<u64> {
        let path = meeting_path(meeting_id)?;
        self.client
            .get_count(&under(&path, &["transcripts", "$count"]), query)
            .await
    }

    pub async fn create_transcript(
        &self,
        meeting_id: &str,
        transcript: &CallTranscript,
    ) -> Result<Value> {
        let path = meeting_path(meeting_id)?;
        self.client
            .post(&under(&path, &["transcripts"]), transcript)
            .await
    }

    pub async fn get_transcript(
        &self,
        meeting_id: &str,
        transcript_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let path = transcript_path(meeting_id, transcript_id)?;
        self.client.get(&path, query).await
    }

    pub async fn update_transcript(
        &self,
        meeting_id: &str,
        transcript_id: &str,
        transcript: &CallTranscript,
    ) -> Result<Value> {
        let path = transcript_path(meeting_id, transcript_id)?;
        self.client.patch(&path, transcript).await
    }

    pub async fn delete_transcript(&self, meeting_id: &str, transcript_id: &str) -> Result<()> {
        let path = transcript_path(meeting_id, transcript_id)?;
        self.client.delete(&path).await
    }

    pub async fn transcripts_delta(&self, meeting_id: &str, query: &ODataQuery) -> Result<Value> {
        let path = meeting_path(meeting_id)?;
        self.client
            .get(&under(&path, &["transcripts", "delta()"]), query)
            .await
    }

    /// Transcript text, `text/vtt` by default.
    pub async fn get_transcript_content(
        &self,
        meeting_id: &str,
        transcript_id: &str,
    ) -> Result<Bytes> {
        let path = transcript_path(meeting_id, transcript_id)?;
        self.client.get_bytes(&under(&path, &["content"])).await
    }

    pub async fn put_transcript_content(
        &self,
        meeting_id: &str,
        transcript_id: &str,
        content: impl Into<Bytes>,
    ) -> Result<Value> {
        let path = transcript_path(meeting_id, transcript_id)?;
        self.client
            .put_bytes(&under(&path, &["content"]), content)
            .await
    }

    pub async fn delete_transcript_content(
        &self,
        meeting_id: &str,
        transcript_id: &str,
    ) -> Result<()> {
        let path = transcript_path(meeting_id, transcript_id)?;
        self.client.delete(&under(&path, &["content"])).await
    }

    pub async fn get_transcript_metadata_content(
        &self,
        meeting_id: &str,
        transcript_id: &str,
    ) -> Result<Bytes> {
        let path = transcript_path(meeting_id, transcript_id)?;
        self.client
            .get_bytes(&under(&path, &["metadataContent"]))
            .await
    }

    pub async fn put_transcript_metadata_content(
        &self,
        meeting_id: &str,
        transcript_id: &str,
        content: impl Into<Bytes>,
    ) -> Result<Value> {
        let path = transcript_path(meeting_id, transcript_id)?;
        self.client
            .put_bytes(&under(&path, &["metadataContent"]), content)
            .await
    }

    pub async fn delete_transcript_metadata_content(
        &self,
        meeting_id: &str,
        transcript_id: &str,
    ) -> Result<()> {
        let path = transcript_path(meeting_id, transcript_id)?;
        self.client
            .delete(&under(&path, &["metadataContent"]))
            .await
    }
}
